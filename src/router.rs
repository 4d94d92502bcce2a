use crate::pattern::{Pattern, PatternError};
use std::{collections::HashMap, hash::Hash, sync::Arc};

/// A registered pattern/handler pair under a single method key.
#[derive(Debug)]
pub struct Route<H> {
	pattern: String,
	matcher: Pattern,
	handler: H,
}

impl<H> Route<H> {
	/// The pattern text this route was registered with.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}
}

/// A successful lookup: the winning route and the wildcard suffix its
/// pattern captured from the request path.
#[derive(Debug)]
pub struct RouteMatch<'r, 'p, H> {
	pub route: &'r Route<H>,
	pub tail: &'p str,
}

type Routes<K, H> = HashMap<K, Vec<Route<H>>>;

/// Accumulates routes during setup. Consumed by [`build`](Self::build);
/// registration is impossible once the table is frozen.
///
/// Overlapping and duplicate patterns are accepted without complaint:
/// precedence is decided purely by registration order, so callers register
/// the specific before the general (`/a` before `/a/*` before `*`).
#[derive(Debug)]
pub struct RouterBuilder<K, H> {
	routes: Routes<K, H>,
}

impl<K, H> Default for RouterBuilder<K, H> {
	fn default() -> Self {
		Self {
			routes: Routes::default(),
		}
	}
}

impl<K, H> RouterBuilder<K, H>
where
	K: Eq + Hash,
{
	/// Compiles `pattern` and appends the route to `method`'s table,
	/// creating the table on first use. Malformed patterns are rejected
	/// here rather than surfacing as silent no-matches later.
	pub fn add(&mut self, method: K, pattern: &str, handler: H) -> Result<&mut Self, PatternError> {
		let matcher = Pattern::compile(pattern)?;
		self.routes.entry(method).or_default().push(Route {
			pattern: pattern.to_owned(),
			matcher,
			handler,
		});
		Ok(self)
	}

	/// Registers the same route under each method, in order. Useful for
	/// stacks served identically for GET and HEAD.
	pub fn add_all<I>(&mut self, methods: I, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
	where
		I: IntoIterator<Item = K>,
		H: Clone,
	{
		for method in methods {
			self.add(method, pattern, handler.clone())?;
		}
		Ok(self)
	}

	pub fn build(self) -> Router<K, H> {
		Router {
			routes: Arc::new(self.routes),
		}
	}
}

/// A frozen route table.
///
/// Holds its routes behind an `Arc`, so clones are cheap and every clone
/// reads the same immutable table. Lookups take `&self` and may run
/// concurrently without synchronization.
#[derive(Debug)]
pub struct Router<K, H> {
	routes: Arc<Routes<K, H>>,
}

impl<K, H> Clone for Router<K, H> {
	fn clone(&self) -> Self {
		Self {
			routes: Arc::clone(&self.routes),
		}
	}
}

impl<K, H> Router<K, H>
where
	K: Eq + Hash,
{
	/// Scans `method`'s routes in registration order and returns the first
	/// whose matcher accepts `path`, or `None` if the method has no table
	/// or the scan exhausts.
	pub fn find<'r, 'p>(&'r self, method: &K, path: &'p str) -> Option<RouteMatch<'r, 'p, H>> {
		self.routes
			.get(method)?
			.iter()
			.find_map(|route| route.matcher.matches(path).map(|tail| RouteMatch { route, tail }))
	}

	/// Whether any route was registered under `method`. Lets callers tell
	/// an unregistered method apart from an exhausted scan.
	pub fn has_method(&self, method: &K) -> bool {
		self.routes.contains_key(method)
	}
}
