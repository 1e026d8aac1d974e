use thiserror::Error;

use crate::ValueType;

#[derive(Debug, Error)]
pub enum BdecodeError {
    #[error("Unexpected end of file in bencoded string at position '{0}' .")]
    UnexpectedEof(usize),

    /// 在读到一个值的任何字节之前输入就已经结束
    #[error("End of input before any value at position '{0}' .")]
    EndOfInput(usize),

    #[error("Expected value (list, dict, int or string) in bencoded string at position '{0}', found byte 0x{1:02x} .")]
    ExpectedValue(usize, u8),

    #[error("Invalid number '{token}' in bencoded string at position '{position}' .")]
    InvalidNumber { position: usize, token: String },

    #[error("Expected string dict key in bencoded string at position '{0}', found {1} .")]
    NonStringKey(usize, ValueType),

    #[error("bencoded recursion depth limit exceeded over '{0}' times.")]
    DepthExceeded(usize),

    #[error("bencoded number token longer than '{0}' bytes.")]
    LimitExceeded(usize),

    #[error("integer overflow with string '{0}'")]
    Overflow(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BdecodeError {
    /// 是否因为输入结束而失败，包括值开始之前就结束的情况
    pub fn is_eof(&self) -> bool {
        matches!(self, BdecodeError::UnexpectedEof(_) | BdecodeError::EndOfInput(_))
    }

    /// 是否在当前值的任何字节之前输入就已经结束，而不是值被截断
    pub fn is_empty_input(&self) -> bool {
        matches!(self, BdecodeError::EndOfInput(_))
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("string is not valid utf-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("integer {value} out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("field '{key}': {source}")]
    Field {
        key: String,
        #[source]
        source: Box<MapError>,
    },

    #[error(transparent)]
    Decode(#[from] BdecodeError),
}

impl MapError {
    pub(crate) fn in_field(self, key: &str) -> Self {
        MapError::Field {
            key: key.to_owned(),
            source: Box::new(self),
        }
    }

    /// 沿着 `Field` 链取出最内层的错误
    pub fn root_cause(&self) -> &MapError {
        let mut err = self;
        while let MapError::Field { source, .. } = err {
            err = source;
        }
        err
    }

    /// 出错字段的完整路径，如 `info.files.length`
    pub fn path(&self) -> Option<String> {
        let mut keys = vec![];
        let mut err = self;
        while let MapError::Field { key, source } = err {
            keys.push(key.as_str());
            err = source;
        }

        if keys.is_empty() {
            None
        } else {
            Some(keys.join("."))
        }
    }
}
