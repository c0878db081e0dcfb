use error_stack::Report;
use mongodb::bson;

use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error(transparent)]
    BsonSerialization(#[from] bson::ser::Error),
    #[error(transparent)]
    Env(#[from] dotenvy::Error),
    #[error("Store returned a non ObjectId key: {0}")]
    UnexpectedKey(bson::Bson),
}

pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            DriverError::Env(_) | DriverError::BsonSerialization(_) => {
                Report::from(error).change_context(KernelError::Internal)
            }
            DriverError::Mongo(_) | DriverError::UnexpectedKey(_) => {
                Report::from(error).change_context(KernelError::StoreUnavailable)
            }
        })
    }
}
