//! A dead simple first-match HTTP path router built on hyper.
//!
//! Routes are registered per method on a [`RouterBuilder`] and matched in
//! registration order: the first pattern that accepts the request path wins,
//! so the specific goes before the general (`/a` before `/a/*` before the
//! universal `*`). [`build`](RouterBuilder::build) freezes the table into a
//! [`Router`] that can only be queried, never extended; a server registers
//! everything up front and shares one frozen table across connections
//! without locks.
//!
//! ```no_run
//! use mortar::{
//! 	hyper::{Method, Server},
//! 	Handler, HandlerFuture, HttpRouter, Request, ResponseBuilder, RouteContext, RouterBuilder,
//! };
//! use std::{path::PathBuf, sync::Arc};
//!
//! struct Site {
//! 	dev: bool,
//! 	dist_dir: PathBuf,
//! }
//!
//! fn favicon(_site: Arc<Site>, _route: RouteContext, _req: Request) -> HandlerFuture {
//! 	Box::pin(async { Ok(ResponseBuilder::default().status(404).body("404".into())?) })
//! }
//!
//! fn assets(site: Arc<Site>, route: RouteContext, _req: Request) -> HandlerFuture {
//! 	Box::pin(async move {
//! 		// `route.tail` is the path below the mount point, e.g. `/app.js`.
//! 		let file = site.dist_dir.join(route.tail.trim_start_matches('/'));
//! 		let cache = if site.dev { "no-cache" } else { "max-age=86400" };
//! 		Ok(ResponseBuilder::default()
//! 			.header("cache-control", cache)
//! 			.body(format!("{}", file.display()).into())?)
//! 	})
//! }
//!
//! fn render(_site: Arc<Site>, route: RouteContext, _req: Request) -> HandlerFuture {
//! 	Box::pin(async move { Ok(ResponseBuilder::default().body(route.url.pathname.into())?) })
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! 	let addr = ([127, 0, 0, 1], 3000).into();
//!
//! 	let mut builder: RouterBuilder<Method, Handler<Site>> = RouterBuilder::default();
//! 	builder
//! 		.add_all(vec![Method::GET, Method::HEAD], "/favicon.ico", favicon)?
//! 		.add_all(vec![Method::GET, Method::HEAD], "/public/*", assets)?
//! 		.add_all(vec![Method::GET, Method::HEAD], "*", render)?;
//!
//! 	let site = Site {
//! 		dev: false,
//! 		dist_dir: PathBuf::from(".out/dist-client"),
//! 	};
//! 	let router = HttpRouter::new(builder.build(), site);
//!
//! 	let server = Server::bind(&addr).serve(router);
//! 	println!("Listening on http://{}", addr);
//!
//! 	server.await?;
//! 	Ok(())
//! }
//! ```
//!
//! Patterns come in three forms: a literal path matched verbatim, a prefix
//! ending in `/*` that also captures the remaining suffix for its handler,
//! and the universal `*`, conventionally registered last as the catch-all.
//! Handlers are plain fn pointers: everything they need arrives through the
//! shared context, the parsed URL, and the captured suffix, never through
//! captured environment.
//!
//! The hyper integration lives behind the `http` feature (enabled by
//! default); without it the crate exposes only the transport-agnostic
//! pattern and table types.

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::*;

/// Pattern compilation: the closed set of matchers a route can use.
pub mod pattern;

/// Contains the core structs of the router.
///
/// Use the RouterBuilder to create a Router; freeze it with `build` before
/// serving.
pub mod router;

pub use pattern::*;
pub use router::*;
