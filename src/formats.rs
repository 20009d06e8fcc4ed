//! Process-wide registry of delegated format predicates.
//!
//! `uri`, `uri-reference`, `uri-template` and `email` are host concerns: the
//! core looks their predicates up here at validation time. The registry ships
//! the defaults below; hosts may replace them with [`register_format`] or
//! remove them with [`unregister_format`], after which the format rejects
//! every string.
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use std::sync::Arc;
use url::Url;

/// A predicate deciding whether a string satisfies a delegated format.
pub type FormatPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

static URI_REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?\z").expect("Is a valid regex"));
static URI_TEMPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:(?:[^\x00-\x20"'<>%\\^`{|}]|%[0-9a-f]{2})|\{[+#./;?&=,!@|]?(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?(?:,(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?)*})*\z"#,
    )
    .expect("Is a valid regex")
});

static DEFAULT_VALIDATORS: Lazy<RwLock<AHashMap<String, FormatPredicate>>> = Lazy::new(|| {
    let mut predicates: AHashMap<String, FormatPredicate> = AHashMap::new();
    predicates.insert(
        "uri".to_string(),
        Arc::new(|value: &str| Url::parse(value).is_ok()),
    );
    predicates.insert(
        "uri-reference".to_string(),
        Arc::new(|value: &str| URI_REFERENCE_RE.is_match(value)),
    );
    predicates.insert(
        "uri-template".to_string(),
        Arc::new(|value: &str| URI_TEMPLATE_RE.is_match(value)),
    );
    predicates.insert(
        "email".to_string(),
        Arc::new(|value: &str| value.contains('@')),
    );
    RwLock::new(predicates)
});

/// Installs (or replaces) the predicate backing a delegated format.
pub fn register_format(
    format: impl Into<String>,
    predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
) {
    DEFAULT_VALIDATORS
        .write()
        .insert(format.into(), Arc::new(predicate));
}

/// Removes a predicate; returns whether one was installed. Validating the
/// format afterwards rejects every string.
pub fn unregister_format(format: &str) -> bool {
    DEFAULT_VALIDATORS.write().remove(format).is_some()
}

pub(crate) fn lookup(format: &str) -> Option<FormatPredicate> {
    DEFAULT_VALIDATORS.read().get(format).cloned()
}

#[cfg(test)]
mod tests {
    use super::lookup;

    #[test]
    fn default_uri_predicate() {
        let uri = lookup("uri").expect("registered by default");
        assert!(uri("https://example.com/a?b=c"));
        assert!(!uri("not a uri"));
    }

    #[test]
    fn default_email_predicate() {
        let email = lookup("email").expect("registered by default");
        assert!(email("user@example.com"));
        assert!(!email("example.com"));
    }

    #[test]
    fn missing_predicate() {
        assert!(lookup("flux-capacitor").is_none());
    }
}
