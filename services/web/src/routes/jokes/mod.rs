use axum::{routing::get, Router};

use super::method_not_allowed;

mod index;
mod joke;
pub mod new;

/// Url-encoded fields in submission order.
type FormFields = Vec<(String, String)>;

pub fn router() -> Router<crate::AppState> {
    Router::new()
        .route("/", get(index::loader).fallback(method_not_allowed))
        .route(
            "/new",
            get(new::loader)
                .post(new::action)
                .fallback(method_not_allowed),
        )
        .route(
            "/:joke_id",
            get(joke::loader)
                .post(joke::action)
                .fallback(method_not_allowed),
        )
}

/// First value submitted under `name`. Browsers send every value of a
/// repeated field and the form reads the first, so later ones are ignored.
fn first_value(fields: FormFields, name: &str) -> Option<String> {
    fields
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn repeated_field_keeps_the_first_value() {
        let submitted = fields(&[("intent", "x"), ("intent", "delete")]);
        assert_eq!(first_value(submitted, "intent").as_deref(), Some("x"));
    }

    #[test]
    fn absent_field_has_no_value() {
        assert_eq!(first_value(fields(&[("name", "a")]), "intent"), None);
        assert_eq!(
            first_value(fields(&[("intent", "")]), "intent").as_deref(),
            Some("")
        );
    }
}
