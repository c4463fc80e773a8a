/// OCPP-J 2.0.1 RPC error codes carried in a CallError frame.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    FormatViolation,
    GenericError,
    InternalError,
    MessageTypeNotSupported,
    NotImplemented,
    NotSupported,
    OccurrenceConstraintViolation,
    PropertyConstraintViolation,
    ProtocolError,
    RpcFrameworkError,
    SecurityError,
    TypeConstraintViolation,
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProtocolError::FormatViolation => "FormatViolation",
            ProtocolError::GenericError => "GenericError",
            ProtocolError::InternalError => "InternalError",
            ProtocolError::MessageTypeNotSupported => "MessageTypeNotSupported",
            ProtocolError::NotImplemented => "NotImplemented",
            ProtocolError::NotSupported => "NotSupported",
            ProtocolError::OccurrenceConstraintViolation => "OccurrenceConstraintViolation",
            ProtocolError::PropertyConstraintViolation => "PropertyConstraintViolation",
            ProtocolError::ProtocolError => "ProtocolError",
            ProtocolError::RpcFrameworkError => "RpcFrameworkError",
            ProtocolError::SecurityError => "SecurityError",
            ProtocolError::TypeConstraintViolation => "TypeConstraintViolation",
        };
        write!(f, "{s}")
    }
}
