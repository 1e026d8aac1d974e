//! ez-bdecode 把 bencode 数据解码成通用的 [`BdecodeValue`]，
//! 并可以按字段描述表把它映射到具体的结构体上。
//!
//! ```
//! use ez_bdecode::{decode_str, BdecodeValue};
//!
//! let value = decode_str("d7:meaningi42e4:wiki7:bencodee").unwrap();
//! assert_eq!(Some(42), value.dict_find_as_int(b"meaning"));
//! assert_eq!(Some("bencode"), value.dict_find_as_str(b"wiki"));
//! assert!(matches!(value.dict_find(b"wiki"), Some(BdecodeValue::Str(_))));
//! ```

mod commons;
mod decode;
mod error;
mod macros;
mod mapper;
mod stream;

pub use commons::{limits, ValueType};
pub use decode::*;
pub use error::*;
pub use mapper::*;
pub use stream::*;

type BdecodeResult<T> = std::result::Result<T, BdecodeError>;
