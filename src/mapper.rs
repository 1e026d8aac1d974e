//! 把解析出的 [`BdecodeValue`] 映射到具体的结构体上。
//!
//! 每个目标类型通过 [`MapTarget::fields`] 提供一张字段描述表：字段名、可选的别名 key，
//! 以及把值写入字段的函数。通常用 [`map_target!`](crate::map_target) 宏生成，
//! 也可以手写。
//!
//! 映射是尽力而为的：某个字段出错时直接返回，之前已经写入的字段不会回滚。

use std::{
    collections::{BTreeMap, HashMap},
    io::Read,
};

use bytes::Bytes;

use crate::{decode_buffer, decode_reader, BdecodeValue, MapError, ValueType};

type MapResult<T> = std::result::Result<T, MapError>;

/// 从 [`BdecodeValue`] 转换出一个字段值
pub trait FromBdecode: Sized {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self>;
}

/// 目标结构体的一个字段描述
pub struct Field<T> {
    name: &'static str,
    key: Option<&'static str>,
    assign: fn(&mut T, &BdecodeValue) -> MapResult<()>,
}

impl<T> Field<T> {
    /// `key` 为 `Some` 时只按别名查找，不再使用字段名
    pub fn new(
        name: &'static str,
        key: Option<&'static str>,
        assign: fn(&mut T, &BdecodeValue) -> MapResult<()>,
    ) -> Self {
        Self { name, key, assign }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> Option<&'static str> {
        self.key
    }

    /// 在 dict 中实际查找的 key
    pub fn lookup_key(&self) -> &'static str {
        self.key.unwrap_or(self.name)
    }
}

impl<T> core::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

/// 可以被映射填充的结构体
pub trait MapTarget: Sized {
    fn fields() -> Vec<Field<Self>>;
}

/// 用 dict 填充 `target`。
///
/// dict 中不存在的 key 对应的字段保持原值；出错时 `target` 可能已被部分填充。
pub fn map_to<T: MapTarget>(value: &BdecodeValue, target: &mut T) -> MapResult<()> {
    let BdecodeValue::Dict(dict) = value else {
        return Err(mismatch(ValueType::Dict, value));
    };

    for field in T::fields() {
        let key = field.lookup_key();
        let Some(val) = dict.get(key.as_bytes()) else {
            tracing::trace!(field = field.name(), key, "key not found, keep default");
            continue;
        };

        (field.assign)(target, val).map_err(|e| e.in_field(key))?;
    }

    Ok(())
}

/// 解码 buffer 后填充 `target`
pub fn map_buffer<T: MapTarget>(buffer: &[u8], target: &mut T) -> MapResult<()> {
    let value = decode_buffer(buffer)?;
    map_to(&value, target)
}

pub fn map_str<T: MapTarget>(s: &str, target: &mut T) -> MapResult<()> {
    map_buffer(s.as_bytes(), target)
}

pub fn map_reader<R: Read, T: MapTarget>(reader: R, target: &mut T) -> MapResult<()> {
    let value = decode_reader(reader)?;
    map_to(&value, target)
}

/// 解码 buffer 并构造一个新的 `T`，未出现的字段取 `T::default()` 中的值
pub fn from_buffer<T: MapTarget + Default>(buffer: &[u8]) -> MapResult<T> {
    let mut target = T::default();
    map_buffer(buffer, &mut target)?;

    Ok(target)
}

fn mismatch(expected: ValueType, value: &BdecodeValue) -> MapError {
    MapError::TypeMismatch {
        expected,
        found: value.value_type(),
    }
}

impl FromBdecode for i64 {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        value.as_int().ok_or_else(|| mismatch(ValueType::Int, value))
    }
}

macro_rules! from_bdecode_int {
    ($($int:ty),*) => {
        $(
            impl FromBdecode for $int {
                fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
                    let v = i64::from_bdecode(value)?;
                    <$int>::try_from(v).map_err(|_| MapError::OutOfRange {
                        value: v,
                        target: stringify!($int),
                    })
                }
            }
        )*
    };
}

from_bdecode_int!(i8, i16, i32, i128, isize, u8, u16, u32, u64, u128, usize);

impl FromBdecode for String {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        let buf = value
            .as_bytes()
            .ok_or_else(|| mismatch(ValueType::Str, value))?;

        Ok(std::str::from_utf8(buf)?.to_owned())
    }
}

impl FromBdecode for Bytes {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        value
            .as_bytes()
            .cloned()
            .ok_or_else(|| mismatch(ValueType::Str, value))
    }
}

impl FromBdecode for BdecodeValue {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        Ok(value.clone())
    }
}

impl<T: FromBdecode> FromBdecode for Option<T> {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        T::from_bdecode(value).map(Some)
    }
}

impl<T: FromBdecode> FromBdecode for Vec<T> {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        let items = value
            .as_list()
            .ok_or_else(|| mismatch(ValueType::List, value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_bdecode(item).map_err(|e| e.in_field(&i.to_string())))
            .collect()
    }
}

/// dict 的 key 必须是合法的 UTF-8，值逐个转换
fn map_entries<T, C>(value: &BdecodeValue) -> MapResult<C>
where
    T: FromBdecode,
    C: FromIterator<(String, T)>,
{
    let dict = value
        .as_dict()
        .ok_or_else(|| mismatch(ValueType::Dict, value))?;

    dict.iter()
        .map(|(raw, val)| -> MapResult<(String, T)> {
            let key = std::str::from_utf8(raw)
                .map_err(|e| MapError::from(e).in_field(&String::from_utf8_lossy(raw)))?;
            let val = T::from_bdecode(val).map_err(|e| e.in_field(key))?;

            Ok((key.to_owned(), val))
        })
        .collect()
}

impl<T: FromBdecode> FromBdecode for HashMap<String, T> {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        map_entries(value)
    }
}

impl<T: FromBdecode> FromBdecode for BTreeMap<String, T> {
    fn from_bdecode(value: &BdecodeValue) -> MapResult<Self> {
        map_entries(value)
    }
}
