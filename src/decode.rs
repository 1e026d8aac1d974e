mod dict;
mod int;
mod list;
mod string;
mod utils;

use std::{borrow::Cow, collections::BTreeMap, io::Read};

use bytes::Bytes;

use crate::{
    commons::limits::DEFAULT_DEPTH_LIMIT,
    stream::{ByteStream, ReaderStream, SliceStream},
    BdecodeError, BdecodeResult, ValueType,
};

pub use utils::{escape_char, escape_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Compact,
    Pretty(usize),
}

/// 解析后的 bencode 值
///
/// 只有四种形态，所有使用方都需要穷尽匹配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BdecodeValue {
    Int(i64),
    /// 原始字节，不保证是合法的 UTF-8
    Str(Bytes),
    List(Vec<BdecodeValue>),
    /// 重复的 key 以最后一次出现的值为准
    Dict(BTreeMap<Bytes, BdecodeValue>),
}

impl BdecodeValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            BdecodeValue::Int(_) => ValueType::Int,
            BdecodeValue::Str(_) => ValueType::Str,
            BdecodeValue::List(_) => ValueType::List,
            BdecodeValue::Dict(_) => ValueType::Dict,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        let BdecodeValue::Int(v) = self else {
            return None;
        };

        Some(*v)
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        let BdecodeValue::Str(v) = self else {
            return None;
        };

        Some(v)
    }

    /// 字符串值的 UTF-8 视图，不是合法 UTF-8 时返回 `None`
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()?).ok()
    }

    /// 字符串值的有损 UTF-8 视图
    pub fn as_str_lossy(&self) -> Option<Cow<'_, str>> {
        Some(String::from_utf8_lossy(self.as_bytes()?))
    }

    pub fn as_list(&self) -> Option<&[BdecodeValue]> {
        let BdecodeValue::List(v) = self else {
            return None;
        };

        Some(v)
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, BdecodeValue>> {
        let BdecodeValue::Dict(v) = self else {
            return None;
        };

        Some(v)
    }

    pub fn into_dict(self) -> Option<BTreeMap<Bytes, BdecodeValue>> {
        let BdecodeValue::Dict(v) = self else {
            return None;
        };

        Some(v)
    }

    /// list 或 dict 的元素个数，其他类型返回 `None`
    pub fn len(&self) -> Option<usize> {
        match self {
            BdecodeValue::List(v) => Some(v.len()),
            BdecodeValue::Dict(v) => Some(v.len()),
            BdecodeValue::Int(_) | BdecodeValue::Str(_) => None,
        }
    }

    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    pub fn list_item(&self, index: usize) -> Option<&BdecodeValue> {
        self.as_list()?.get(index)
    }

    pub fn dict_find(&self, key: &[u8]) -> Option<&BdecodeValue> {
        self.as_dict()?.get(key)
    }

    pub fn dict_find_as_int(&self, key: &[u8]) -> Option<i64> {
        self.dict_find(key)?.as_int()
    }

    pub fn dict_find_as_str(&self, key: &[u8]) -> Option<&str> {
        self.dict_find(key)?.as_str()
    }

    pub fn dict_find_as_list(&self, key: &[u8]) -> Option<&[BdecodeValue]> {
        self.dict_find(key)?.as_list()
    }

    pub fn dict_find_as_dict(&self, key: &[u8]) -> Option<&BTreeMap<Bytes, BdecodeValue>> {
        self.dict_find(key)?.as_dict()
    }

    pub fn to_json_with_style(&self, style: Style) -> String {
        match self {
            BdecodeValue::Int(v) => v.to_string(),
            BdecodeValue::Str(v) => string::to_json(v),
            BdecodeValue::List(v) => list::to_json_with_style(v, style),
            BdecodeValue::Dict(v) => dict::to_json_with_style(v, style),
        }
    }

    pub fn to_json(&self) -> String {
        self.to_json_with_style(Style::Compact)
    }

    pub fn to_json_pretty(&self) -> String {
        self.to_json_with_style(Style::Pretty(0))
    }
}

impl From<i64> for BdecodeValue {
    fn from(v: i64) -> Self {
        BdecodeValue::Int(v)
    }
}

impl From<&str> for BdecodeValue {
    fn from(v: &str) -> Self {
        BdecodeValue::Str(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<Bytes> for BdecodeValue {
    fn from(v: Bytes) -> Self {
        BdecodeValue::Str(v)
    }
}

impl From<Vec<BdecodeValue>> for BdecodeValue {
    fn from(v: Vec<BdecodeValue>) -> Self {
        BdecodeValue::List(v)
    }
}

impl From<BTreeMap<Bytes, BdecodeValue>> for BdecodeValue {
    fn from(v: BTreeMap<Bytes, BdecodeValue>) -> Self {
        BdecodeValue::Dict(v)
    }
}

/// 递归下降解码器
///
/// 每次只向前窥视一个字节来决定走哪条产生式，顶层值结束后不会再读取任何字节，
/// 调用方可以通过 [`Decoder::into_inner`] 取回流继续处理剩余的数据。
#[derive(Debug)]
pub struct Decoder<S> {
    stream: S,
    depth_limit: usize,
    depth: usize,
}

impl<S: ByteStream> Decoder<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            depth: 0,
        }
    }

    /// 设置 dict 和 list 的最大嵌套深度
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn position(&self) -> usize {
        self.stream.position()
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    /// 解码一个完整的顶层值
    pub fn decode(&mut self) -> BdecodeResult<BdecodeValue> {
        self.depth = 0;
        let start = self.stream.position();
        tracing::trace!(position = start, "bdecode start");

        // 值开始之前就没有数据，区别于值被截断
        if let Err(BdecodeError::UnexpectedEof(_)) = self.stream.peek_byte() {
            return Err(BdecodeError::EndOfInput(start));
        }

        let value = self.decode_value()?;

        tracing::trace!(
            start,
            end = self.stream.position(),
            value_type = %value.value_type(),
            "bdecode finished"
        );
        Ok(value)
    }

    /// 依次解码流中的值，输入在两个值之间干净地结束时返回 `None`
    pub fn decode_next(&mut self) -> BdecodeResult<Option<BdecodeValue>> {
        match self.decode() {
            Ok(value) => Ok(Some(value)),
            Err(BdecodeError::EndOfInput(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn decode_value(&mut self) -> BdecodeResult<BdecodeValue> {
        let position = self.stream.position();

        // 只窥视首字节，字符串的长度数字要留给 decode_str 读取
        match self.stream.peek_byte()? {
            b'i' => self.decode_int(),
            b'l' => self.nested(Self::decode_list),
            b'd' => self.nested(Self::decode_dict),
            t if t.is_ascii_digit() => self.decode_str(),
            t => Err(BdecodeError::ExpectedValue(position, t)),
        }
    }

    fn nested(
        &mut self,
        production: fn(&mut Self) -> BdecodeResult<BdecodeValue>,
    ) -> BdecodeResult<BdecodeValue> {
        if self.depth >= self.depth_limit {
            tracing::debug!(
                position = self.stream.position(),
                depth_limit = self.depth_limit,
                "bdecode depth limit exceeded"
            );
            return Err(BdecodeError::DepthExceeded(self.depth_limit));
        }

        self.depth += 1;
        let value = production(self)?;
        self.depth -= 1;

        Ok(value)
    }
}

/// 从任意字节源解码一个值
pub fn decode<S: ByteStream>(stream: S) -> BdecodeResult<BdecodeValue> {
    Decoder::new(stream).decode()
}

/// 同 [`decode`]，`depth_limit` 为 `None` 时使用默认的嵌套深度限制
pub fn decode_with_limit<S: ByteStream>(
    stream: S,
    depth_limit: Option<usize>,
) -> BdecodeResult<BdecodeValue> {
    let depth_limit = depth_limit.unwrap_or(DEFAULT_DEPTH_LIMIT);
    Decoder::new(stream).with_depth_limit(depth_limit).decode()
}

pub fn decode_buffer(buffer: &[u8]) -> BdecodeResult<BdecodeValue> {
    decode(SliceStream::new(buffer))
}

pub fn decode_str(s: &str) -> BdecodeResult<BdecodeValue> {
    decode_buffer(s.as_bytes())
}

/// 从 reader 解码，内部会包一层 `BufReader`，因此顶层值之后的数据可能被多读走。
pub fn decode_reader<R: Read>(reader: R) -> BdecodeResult<BdecodeValue> {
    decode(ReaderStream::new(std::io::BufReader::new(reader)))
}
