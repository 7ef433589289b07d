#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    domain: web::Data<Domain>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](domain, info).await {
                        Ok(response) => response,
                        Err(err) => <$response>::err(err),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use crate::error::DomainError;

pub fn assert_filled(value: &str, field: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_not_filled() {
        assert!(assert_filled("advising", "purpose").is_ok());
        assert!(assert_filled("  ", "purpose").is_err());
        assert!(assert_filled("", "purpose").is_err());
    }

    #[test]
    fn substring_match_ignores_case() {
        assert!(contains_ci("Computer Science", "science"));
        assert!(contains_ci("Algorithms", "ALGO"));
        assert!(!contains_ci("Physics", "chem"));
        // an empty needle matches anything
        assert!(contains_ci("anything", ""));
    }
}
