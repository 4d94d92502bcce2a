use thiserror::Error;

/// Raised by [`compile`](Pattern::compile) when a pattern cannot be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
	#[error("route pattern is empty")]
	Empty,
	#[error("wildcard must be the whole pattern or a `/*` suffix: {0:?}")]
	StrayWildcard(String),
}

/// A compiled route pattern.
///
/// Three forms exist: a literal path matched verbatim, a prefix followed by
/// `/*`, and the lone `*` that accepts everything. Compilation is a pure
/// function of the pattern text and happens once, at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
	Exact(String),
	Prefix(String),
	Universal,
}

impl Pattern {
	pub fn compile(pattern: &str) -> Result<Self, PatternError> {
		if pattern.is_empty() {
			return Err(PatternError::Empty);
		}

		if pattern == "*" {
			return Ok(Self::Universal);
		}

		if let Some(prefix) = pattern.strip_suffix("/*") {
			if prefix.contains('*') {
				return Err(PatternError::StrayWildcard(pattern.to_owned()));
			}
			return Ok(Self::Prefix(prefix.to_owned()));
		}

		if pattern.contains('*') {
			return Err(PatternError::StrayWildcard(pattern.to_owned()));
		}

		Ok(Self::Exact(pattern.to_owned()))
	}

	/// Tests a request path, returning the captured wildcard suffix on a hit.
	///
	/// Literal patterns capture nothing, prefix patterns capture everything
	/// after the prefix (leading slash included), and the universal pattern
	/// captures the whole path. A prefix only matches on a segment boundary:
	/// `/public/*` accepts `/public` and `/public/app.css`, never `/publicx`.
	pub fn matches<'p>(&self, path: &'p str) -> Option<&'p str> {
		match self {
			Self::Exact(exact) => {
				if path == exact {
					Some("")
				} else {
					None
				}
			}
			Self::Prefix(prefix) => {
				let tail = path.strip_prefix(prefix.as_str())?;
				if tail.is_empty() || tail.starts_with('/') {
					Some(tail)
				} else {
					None
				}
			}
			Self::Universal => Some(path),
		}
	}
}

#[cfg(test)]
mod test {
	use super::{Pattern, PatternError};

	#[test]
	fn compiles_all_three_forms() {
		assert_eq!(
			Pattern::compile("/favicon.ico"),
			Ok(Pattern::Exact("/favicon.ico".to_owned()))
		);
		assert_eq!(
			Pattern::compile("/public/*"),
			Ok(Pattern::Prefix("/public".to_owned()))
		);
		assert_eq!(Pattern::compile("*"), Ok(Pattern::Universal));
	}

	#[test]
	fn rejects_malformed_patterns() {
		assert_eq!(Pattern::compile(""), Err(PatternError::Empty));
		assert_eq!(
			Pattern::compile("/a/*/b"),
			Err(PatternError::StrayWildcard("/a/*/b".to_owned()))
		);
		assert_eq!(
			Pattern::compile("/files*"),
			Err(PatternError::StrayWildcard("/files*".to_owned()))
		);
		assert_eq!(
			Pattern::compile("*.ico"),
			Err(PatternError::StrayWildcard("*.ico".to_owned()))
		);
	}

	#[test]
	fn exact_is_verbatim() {
		let pattern = Pattern::compile("/a").unwrap();
		assert_eq!(pattern.matches("/a"), Some(""));
		assert_eq!(pattern.matches("/a/"), None);
		assert_eq!(pattern.matches("/a/b"), None);
		assert_eq!(pattern.matches("/A"), None);
	}

	#[test]
	fn prefix_matches_on_segment_boundary() {
		let pattern = Pattern::compile("/public/*").unwrap();
		assert_eq!(pattern.matches("/public"), Some(""));
		assert_eq!(pattern.matches("/public/"), Some("/"));
		assert_eq!(pattern.matches("/public/css/site.css"), Some("/css/site.css"));
		assert_eq!(pattern.matches("/publicx"), None);
		assert_eq!(pattern.matches("/pub"), None);
	}

	#[test]
	fn universal_accepts_everything() {
		let pattern = Pattern::compile("*").unwrap();
		assert_eq!(pattern.matches("/"), Some("/"));
		assert_eq!(pattern.matches("/deeply/nested/page"), Some("/deeply/nested/page"));
	}

	#[test]
	fn compilation_is_pure() {
		let paths = ["/", "/public", "/public/app.js", "/publicx", "/other"];
		for text in ["/public/*", "/public", "*"] {
			let first = Pattern::compile(text).unwrap();
			let second = Pattern::compile(text).unwrap();
			assert_eq!(first, second);
			for path in &paths {
				assert_eq!(first.matches(path), second.matches(path), "{} on {}", text, path);
			}
		}
	}
}
