use std::{num::IntErrorKind, str::FromStr};

use crate::{
    commons::limits::{MAX_NUMBER_DIGITS, MAX_NUMBER_LEN},
    stream::ByteStream,
    BdecodeError, BdecodeResult,
};

/// 读取字节直到遇到 delimiter，返回 delimiter 之前的内容，delimiter 本身被消费。
///
/// 整数和字符串长度共用这一步，数字是否合法留给 [`parse_number`] 判断。
/// 负号和前导零不计入有效数字，但整个 token 的长度受 `MAX_NUMBER_LEN` 限制。
pub(crate) fn read_until<S: ByteStream>(stream: &mut S, delimiter: u8) -> BdecodeResult<Vec<u8>> {
    let start = stream.position();
    let mut token = Vec::with_capacity(MAX_NUMBER_DIGITS);
    let mut significant = 0;

    loop {
        let t = stream.read_byte()?;
        if t == delimiter {
            return Ok(token);
        }

        let leading = (t == b'-' && token.is_empty()) || (t == b'0' && significant == 0);
        if !leading {
            significant += 1;
        }
        token.push(t);

        if significant > MAX_NUMBER_DIGITS {
            let is_numeric = token.iter().all(|t| t.is_ascii_digit() || *t == b'-');
            let token = String::from_utf8_lossy(&token).into_owned();

            return Err(if is_numeric {
                BdecodeError::Overflow(token)
            } else {
                BdecodeError::InvalidNumber {
                    position: start,
                    token,
                }
            });
        }

        if token.len() > MAX_NUMBER_LEN {
            return Err(BdecodeError::LimitExceeded(MAX_NUMBER_LEN));
        }
    }
}

/// 把 [`read_until`] 读出的内容解析成十进制数字，`position` 是 token 的起始位置
pub(crate) fn parse_number<T>(token: &[u8], position: usize) -> BdecodeResult<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    let invalid = || BdecodeError::InvalidNumber {
        position,
        token: String::from_utf8_lossy(token).into_owned(),
    };

    let s = std::str::from_utf8(token).map_err(|_| invalid())?;

    s.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            BdecodeError::Overflow(s.to_owned())
        }
        _ => invalid(),
    })
}

pub(crate) fn gen_blanks(span: usize) -> String {
    " ".repeat(span)
}

pub fn escape_char(byte: u8) -> String {
    match byte {
        b' ' => " ".into(),
        b'"' | b'\\' => format!("\\x{:02x}", byte),
        _ if byte.is_ascii_graphic() => format!("{}", byte as char),
        _ => format!("\\x{:02x}", byte),
    }
}

pub fn escape_string(bytes: &[u8]) -> String {
    let mut result = String::new();
    for c in bytes.iter() {
        result.push_str(&escape_char(*c));
    }

    result
}
