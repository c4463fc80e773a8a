use super::frame::{Call, CallError, CallResult};

/// A frame that could not be split into Call/CallResult/CallError.
#[derive(Debug, Clone, PartialEq)]
pub struct Invalid {
    pub unique_id: Option<String>,
    pub message: String,
    pub err_msg: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallResponse<T> {
    CallResult(CallResult),
    CallError(CallError<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OcppMessage<T> {
    Call(Call),
    CallResponse(CallResponse<T>),
    Invalid(Invalid),
}

pub trait EncodeDecode {
    fn encode(&self) -> String;
}

impl<T> CallResponse<T> {
    pub fn get_unique_id(&self) -> &str {
        match self {
            CallResponse::CallResult(t) => &t.unique_id,
            CallResponse::CallError(t) => &t.unique_id,
        }
    }
}

fn invalid<T>(unique_id: Option<String>, message: String, err_msg: impl Into<String>) -> OcppMessage<T> {
    OcppMessage::Invalid(Invalid {
        unique_id,
        message,
        err_msg: err_msg.into(),
    })
}

impl<T: serde::de::DeserializeOwned> OcppMessage<T> {
    pub fn decode(message: String) -> OcppMessage<T> {
        let raw: serde_json::Value = match serde_json::from_str(&message) {
            Ok(val) => val,
            Err(e) => return invalid(None, message, format!("JSON parse error: {e}")),
        };

        let arr = match raw {
            serde_json::Value::Array(arr) => arr,
            _ => return invalid(None, message, "Expected JSON array"),
        };

        let unique_id = arr.get(1).and_then(|v| v.as_str()).map(str::to_string);

        match arr.first().and_then(|v| v.as_u64()) {
            Some(2) if arr.len() == 4 => {
                let action = arr[2].as_str().map(str::to_string);
                match (unique_id.clone(), action, arr[3].is_object()) {
                    (Some(unique_id), Some(action), true) => OcppMessage::Call(Call {
                        unique_id,
                        action,
                        payload: arr[3].clone(),
                    }),
                    _ => invalid(unique_id, message, "Invalid Call structure"),
                }
            }

            Some(3) if arr.len() == 3 => match unique_id {
                Some(unique_id) => OcppMessage::CallResponse(CallResponse::CallResult(CallResult {
                    unique_id,
                    payload: arr[2].clone(),
                })),
                None => invalid(None, message, "Invalid CallResult structure"),
            },

            Some(4) if arr.len() == 5 => {
                let error_code = serde_json::from_value::<T>(arr[2].clone());
                let error_description = arr[3].as_str().map(str::to_string);

                match (unique_id.clone(), error_code, error_description) {
                    (Some(unique_id), Ok(error_code), Some(error_description)) => {
                        OcppMessage::CallResponse(CallResponse::CallError(CallError {
                            unique_id,
                            error_code,
                            error_description,
                            error_details: arr[4].clone(),
                        }))
                    }
                    _ => invalid(unique_id, message, "Invalid CallError structure"),
                }
            }

            _ => invalid(unique_id, message, "Unknown or malformed message"),
        }
    }
}

impl EncodeDecode for Call {
    fn encode(&self) -> String {
        serde_json::json!([2, self.unique_id, self.action, self.payload]).to_string()
    }
}

impl EncodeDecode for CallResult {
    fn encode(&self) -> String {
        serde_json::json!([3, self.unique_id, self.payload]).to_string()
    }
}

impl<T: ToString> EncodeDecode for CallError<T> {
    fn encode(&self) -> String {
        serde_json::json!([
            4,
            self.unique_id,
            self.error_code.to_string(),
            self.error_description,
            self.error_details,
        ])
        .to_string()
    }
}

impl<T: ToString> CallResponse<T> {
    pub fn encode(&self) -> String {
        match self {
            CallResponse::CallResult(t) => t.encode(),
            CallResponse::CallError(t) => t.encode(),
        }
    }
}
