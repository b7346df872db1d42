//! Response envelopes and extractors shared by every route group

mod response;
mod validated_json;

pub use response::{
    ApiError, ApiResponse, ApiResult, ErrorResponse, DEFAULT_SUCCESS_MESSAGE,
    VALIDATION_FAILED_MESSAGE,
};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
