use crate::router::Router;
use anyhow::{Error, Result};
use hyper::{
	body::Body,
	http::{response::Builder, Method},
	service::Service,
};
use percent_encoding::percent_decode_str;
use std::{
	collections::HashMap,
	convert::Infallible,
	future::{ready, Future, Ready},
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};
use url::form_urlencoded;

pub use hyper;

pub use hyper::http::response::Builder as ResponseBuilder;
pub type Request = hyper::Request<Body>;
pub type Response = Result<hyper::Response<Body>>;
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A route handler: a plain fn pointer, so it cannot close over ambient
/// state. Everything it needs from its environment arrives through the
/// shared context `C`.
pub type Handler<C> = fn(Arc<C>, RouteContext, Request) -> HandlerFuture;

/// A function that can convert a handler error into a response.
pub type ErrorHandler = fn(e: Error) -> hyper::Response<Body>;

/// A function that handles unroutable requests and creates a response.
pub type NotFoundHandler = fn(req: Request) -> hyper::Response<Body>;

fn default_error_handler(e: Error) -> hyper::Response<Body> {
	Builder::default()
		.status(500)
		.body(e.to_string().into())
		.unwrap()
}

fn default_not_found_handler(_req: Request) -> hyper::Response<Body> {
	Builder::default().status(404).body(Body::empty()).unwrap()
}

/// The request URL, split ahead of dispatch: the percent-decoded path and
/// the query string parsed into a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
	pub pathname: String,
	pub query: HashMap<String, String>,
}

impl ParsedUrl {
	/// Splits a request target (`/path?key=value`) at the first `?`. Later
	/// occurrences of a query key overwrite earlier ones.
	pub fn parse(target: &str) -> Self {
		let (raw_path, raw_query) = match target.find('?') {
			Some(at) => (&target[..at], &target[at + 1..]),
			None => (target, ""),
		};

		let pathname = percent_decode_str(raw_path).decode_utf8_lossy().into_owned();

		let mut query = HashMap::new();
		for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
			query.insert(key.into_owned(), value.into_owned());
		}

		Self { pathname, query }
	}
}

/// Per-request data handed to the matched handler: the parsed URL and the
/// wildcard suffix captured by the winning pattern. Mount-style handlers
/// use `tail` to strip their prefix before delegating.
#[derive(Debug, Clone)]
pub struct RouteContext {
	pub url: ParsedUrl,
	pub tail: String,
}

/// A frozen route table bound to its shared context, ready to serve.
///
/// Acts as hyper's make-service: each connection gets a [`RequestHandler`]
/// reading the same table. The response hooks cover requests no handler
/// claims and handler failures; by default an unregistered method answers
/// with the same 404 as an unmatched path.
pub struct HttpRouter<C> {
	router: Router<Method, Handler<C>>,
	context: Arc<C>,
	internal_error: ErrorHandler,
	not_found: NotFoundHandler,
	unhandled_method: NotFoundHandler,
}

impl<C> HttpRouter<C> {
	pub fn new(router: Router<Method, Handler<C>>, context: C) -> Self {
		Self {
			router,
			context: Arc::new(context),
			internal_error: default_error_handler,
			not_found: default_not_found_handler,
			unhandled_method: default_not_found_handler,
		}
	}

	pub fn context(&self) -> &C {
		&self.context
	}

	/// Replaces the response built when a handler returns an error.
	pub fn internal_error_handler(mut self, handler: ErrorHandler) -> Self {
		self.internal_error = handler;
		self
	}

	/// Replaces the response for paths no registered pattern accepts.
	pub fn not_found_handler(mut self, handler: NotFoundHandler) -> Self {
		self.not_found = handler;
		self
	}

	/// Replaces the response for methods with no routes at all, e.g. to
	/// answer 405 instead of the default 404.
	pub fn unhandled_method_handler(mut self, handler: NotFoundHandler) -> Self {
		self.unhandled_method = handler;
		self
	}
}

impl<C, T> Service<T> for HttpRouter<C> {
	type Response = RequestHandler<C>;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, _: T) -> Self::Future {
		ready(Ok(RequestHandler {
			router: self.router.clone(),
			context: Arc::clone(&self.context),
			internal_error: self.internal_error,
			not_found: self.not_found,
			unhandled_method: self.unhandled_method,
		}))
	}
}

/// Responsible for handling the actual HTTP requests from hyper.
pub struct RequestHandler<C> {
	router: Router<Method, Handler<C>>,
	context: Arc<C>,
	internal_error: ErrorHandler,
	not_found: NotFoundHandler,
	unhandled_method: NotFoundHandler,
}

impl<C> RequestHandler<C> {
	/// Dispatches one request given its pre-parsed URL.
	///
	/// The first route registered under the request's method whose pattern
	/// accepts `url.pathname` runs, exactly once. A request nothing claims
	/// resolves to the not-found or unhandled-method response instead, so
	/// every request gets exactly one terminal outcome. A failing handler's
	/// error comes back unmodified; only the [`Service`] adapter turns it
	/// into a response.
	pub fn route(&self, req: Request, url: ParsedUrl) -> HandlerFuture {
		let hit = self
			.router
			.find(req.method(), &url.pathname)
			.map(|found| {
				tracing::debug!(
					method = %req.method(),
					path = %url.pathname,
					pattern = %found.route.pattern(),
					"dispatching to matched route"
				);
				(*found.route.handler(), found.tail.to_owned())
			});

		match hit {
			Some((handler, tail)) => {
				handler(Arc::clone(&self.context), RouteContext { url, tail }, req)
			}
			None if self.router.has_method(req.method()) => {
				tracing::debug!(method = %req.method(), path = %url.pathname, "no route matched");
				let response = (self.not_found)(req);
				Box::pin(async { Ok(response) })
			}
			None => {
				tracing::debug!(method = %req.method(), "method has no routes");
				let response = (self.unhandled_method)(req);
				Box::pin(async { Ok(response) })
			}
		}
	}
}

impl<C> Service<Request> for RequestHandler<C> {
	type Response = hyper::Response<Body>;
	type Error = Infallible;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, req: Request) -> Self::Future {
		let target = req
			.uri()
			.path_and_query()
			.map(|target| target.as_str().to_owned())
			.unwrap_or_else(|| req.uri().path().to_owned());
		let url = ParsedUrl::parse(&target);

		let fut = self.route(req, url);
		let err = self.internal_error;
		Box::pin(async move { Ok(fut.await.unwrap_or_else(err)) })
	}
}
