#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum GenericError {
    TimeOut,
    Offline,
    General,
    ParsingError,
}

impl core::fmt::Display for GenericError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            GenericError::TimeOut => "timed out",
            GenericError::Offline => "offline",
            GenericError::General => "general failure",
            GenericError::ParsingError => "payload could not be parsed",
        };
        write!(f, "{s}")
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum OcppError<T> {
    Protocol(T),
    Other(GenericError),
}

impl<T: core::fmt::Display> core::fmt::Display for OcppError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OcppError::Protocol(code) => write!(f, "protocol error: {code}"),
            OcppError::Other(e) => write!(f, "{e}"),
        }
    }
}
