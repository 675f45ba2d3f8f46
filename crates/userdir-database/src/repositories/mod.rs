//! Repository implementations.

pub mod user;

pub use user::UserRepository;

use std::future::Future;

use tokio::time::Instant;

use userdir_core::AppResult;

use crate::errors::{classify_sqlx, deadline_exceeded};

/// Drive a store future to completion under an absolute deadline.
///
/// Failures are classified exactly once; an elapsed deadline abandons the
/// in-flight query (the driver returns the connection to the pool on drop)
/// and reports `DeadlineExceeded`.
pub(crate) async fn run_until<T>(
    context: &str,
    deadline: Instant,
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> AppResult<T> {
    match tokio::time::timeout_at(deadline, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(classify_sqlx(context, err)),
        Err(_) => Err(deadline_exceeded(context)),
    }
}
