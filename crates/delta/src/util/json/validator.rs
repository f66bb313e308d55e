use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use lostfound_result::{create_error, Error, ValidationDetail};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Run `validator` checks on an extracted value
pub struct Validate<T>(pub T);

impl<T> Validate<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validate<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Validate<T>
where
    T: FromRequest<S, Rejection = Error> + validator::Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = T::from_request(req, state).await?;

        if let Err(errors) = inner.validate() {
            return Err(create_error!(FailedValidation {
                details: details(&errors)
            }));
        }

        Ok(Validate(inner))
    }
}

/// Flatten nested validation errors into `path: message` details
pub fn details(errors: &ValidationErrors) -> Vec<ValidationDetail> {
    let mut details = vec![];
    collect("", errors.errors(), &mut details);
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

fn collect(
    prefix: &str,
    errors: &HashMap<std::borrow::Cow<'static, str>, ValidationErrorsKind>,
    details: &mut Vec<ValidationDetail>,
) {
    for (field, kind) in errors {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                for error in errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("failed `{}` check", error.code));

                    details.push(ValidationDetail::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(&path, nested.errors(), details),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(&format!("{path}[{index}]"), nested.errors(), details);
                }
            }
        }
    }
}
