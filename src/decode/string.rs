use crate::stream::ByteStream;

use super::{
    utils::{escape_string, parse_number, read_until},
    BdecodeResult, BdecodeValue, Decoder,
};

impl<S: ByteStream> Decoder<S> {
    /// 解析 `<长度>:<内容>`
    ///
    /// eg: "10:abcdefghij"
    ///      ^^ ^
    ///      || |
    ///      || 内容从 ':' 之后开始，恰好 10 个字节
    ///      |长度的十进制表示
    ///      start
    pub(super) fn decode_str(&mut self) -> BdecodeResult<BdecodeValue> {
        let start = self.stream.position();
        let token = read_until(&mut self.stream, b':')?;
        let len = parse_number::<usize>(&token, start)?;

        let buf = self.stream.read_bytes(len)?;

        Ok(BdecodeValue::Str(buf))
    }
}

pub(super) fn to_json(buf: &[u8]) -> String {
    format!(r#""{}""#, escape_string(buf))
}

#[cfg(test)]
mod tests {
    use crate::{decode_buffer, decode_str, BdecodeError, BdecodeValue};

    #[test]
    fn test_string_value() {
        let value = decode_str("11:k1000000012").unwrap();
        assert_eq!(Some("k1000000012"), value.as_str());

        // 内容里的 'e' 和 ':' 都是普通字节
        let value = decode_str("4:e:i1").unwrap();
        assert_eq!(Some("e:i1"), value.as_str());
    }

    #[test]
    fn test_invalid_length() {
        let err = decode_str("1a:x").unwrap_err();
        assert!(matches!(err, BdecodeError::InvalidNumber { position: 0, .. }));

        let err = decode_str("99999999999999999999:x").unwrap_err();
        assert!(matches!(err, BdecodeError::Overflow(_)));

        // 没有 ':' 的超长数字不能被无限缓存
        let buffer = "1".repeat(1000);
        let err = decode_str(&buffer).unwrap_err();
        assert!(matches!(err, BdecodeError::Overflow(_)));
    }

    #[test]
    fn test_zero_padded_length() {
        let value = decode_str("000000000000000000005:abcde").unwrap();
        assert_eq!(Some("abcde"), value.as_str());
    }

    #[test]
    fn test_short_read() {
        let err = decode_buffer(b"5:abcd").unwrap_err();
        assert!(matches!(err, BdecodeError::UnexpectedEof(6)));

        let err = decode_buffer(b"5:").unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn test_to_json() {
        let value = BdecodeValue::from("a\"b c\x01");
        assert_eq!(r#""a\x22b c\x01""#, value.to_json());

        // 反斜杠本身也要转义，否则与转义后的字节无法区分
        let escaped = decode_buffer(b"4:\\x01").unwrap();
        let raw = decode_buffer(b"1:\x01").unwrap();
        assert_eq!(r#""\x5cx01""#, escaped.to_json());
        assert_ne!(escaped.to_json(), raw.to_json());
    }
}
