use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Uniform outcome of a tool call: `{ok: true, data}` or `{ok: false, error}`.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolResult<T> {
    Ok(T),
    Err(String),
}

impl<T> ToolResult<T> {
    pub fn success(data: T) -> Self {
        ToolResult::Ok(data)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ToolResult::Err(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ToolResult::Ok(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ToolResult::Ok(_) => None,
            ToolResult::Err(e) => Some(e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ToolResult<U> {
        match self {
            ToolResult::Ok(v) => ToolResult::Ok(f(v)),
            ToolResult::Err(e) => ToolResult::Err(e),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ToolResult<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => ToolResult::Ok(v),
            Err(e) => ToolResult::Err(e.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for ToolResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ToolResult", 2)?;
        match self {
            ToolResult::Ok(data) => {
                s.serialize_field("ok", &true)?;
                s.serialize_field("data", data)?;
            }
            ToolResult::Err(error) => {
                s.serialize_field("ok", &false)?;
                s.serialize_field("error", error)?;
            }
        }
        s.end()
    }
}

/// Body returned by deletes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DeletedRef {
    pub id: String,
}
