use std::collections::BTreeMap;

use bytes::Bytes;

use crate::stream::ByteStream;

use super::{
    string, utils::gen_blanks, BdecodeError, BdecodeResult, BdecodeValue, Decoder, Style,
};

impl<S: ByteStream> Decoder<S> {
    /// 解析 `d<key><value>...e`，key 必须是字符串
    pub(super) fn decode_dict(&mut self) -> BdecodeResult<BdecodeValue> {
        // skip 'd'
        self.stream.read_byte()?;

        let mut dict = BTreeMap::new();
        while self.stream.peek_byte()? != b'e' {
            let key_start = self.stream.position();
            let key = match self.decode_value()? {
                BdecodeValue::Str(key) => key,
                other => return Err(BdecodeError::NonStringKey(key_start, other.value_type())),
            };

            let value = self.decode_value()?;
            // 重复的 key 后者覆盖前者
            dict.insert(key, value);
        }

        // skip 'e'
        self.stream.read_byte()?;

        Ok(BdecodeValue::Dict(dict))
    }
}

pub(super) fn to_json_with_style(dict: &BTreeMap<Bytes, BdecodeValue>, style: Style) -> String {
    if dict.is_empty() {
        return "{}".into();
    }

    match style {
        Style::Compact => {
            let items = dict
                .iter()
                .map(|(key, val)| format!("{}: {}", string::to_json(key), val.to_json()))
                .collect::<Vec<_>>();

            format!("{{{}}}", items.join(", "))
        }
        Style::Pretty(span) => {
            let blanks = gen_blanks(span + 2);
            let items = dict
                .iter()
                .map(|(key, val)| {
                    format!(
                        "{}{}: {}",
                        blanks,
                        string::to_json(key),
                        val.to_json_with_style(Style::Pretty(span + 2))
                    )
                })
                .collect::<Vec<_>>();

            format!("{{\n{}\n{}}}", items.join(",\n"), gen_blanks(span))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{decode_str, BdecodeValue};

    #[test]
    fn test_dict_find() {
        // {"k1": "v1", "k2": [1, 2], "k03": 3, "k4": {"k5": 5, "k6": 6}}
        let buffer = "d 2:k1 2:v1 2:k2 l i1e i2e e 3:k03 i3e 2:k4 d 2:k5 i5e 2:k6 i6e e e".replace(' ', "");
        let value = decode_str(&buffer).unwrap();
        assert_eq!(Some(4), value.len());

        assert_eq!(Some("v1"), value.dict_find_as_str(b"k1"));
        assert_eq!(Some(3), value.dict_find_as_int(b"k03"));

        let k2 = value.dict_find_as_list(b"k2").unwrap();
        assert_eq!(vec![BdecodeValue::Int(1), BdecodeValue::Int(2)], k2);

        let k4 = value.dict_find(b"k4").unwrap();
        assert_eq!(Some(5), k4.dict_find_as_int(b"k5"));
        assert_eq!(Some(6), k4.dict_find_as_int(b"k6"));
    }

    #[test]
    fn test_empty_dict() {
        let value = decode_str("de").unwrap();
        assert_eq!(Some(0), value.len());
        assert_eq!("{}", value.to_json());
    }

    #[test]
    fn test_binary_key() {
        let value = decode_str("d2:\u{1}ai1ee").unwrap();
        assert_eq!(Some(1), value.dict_find_as_int(b"\x01a"));
        assert_eq!(r#"{"\x01a": 1}"#, value.to_json());
    }

    #[test]
    fn test_pretty() {
        let value = decode_str("d1:ai1e1:bli2eee").unwrap();
        assert_eq!("{\n  \"a\": 1,\n  \"b\": [\n    2\n  ]\n}", value.to_json_pretty());
    }
}
