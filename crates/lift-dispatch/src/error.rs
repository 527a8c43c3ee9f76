use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown dispatch policy {0:?}: expected \"stay_where_stopped\" or \"return_to:<floor>\"")]
    UnknownPolicy(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
