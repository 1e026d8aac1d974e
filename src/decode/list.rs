use crate::stream::ByteStream;

use super::{utils::gen_blanks, BdecodeResult, BdecodeValue, Decoder, Style};

impl<S: ByteStream> Decoder<S> {
    /// 解析 `l<值>...e`
    pub(super) fn decode_list(&mut self) -> BdecodeResult<BdecodeValue> {
        // skip 'l'
        self.stream.read_byte()?;

        let mut items = vec![];
        // 先窥视，不是 'e' 才交给 decode_value 消费
        while self.stream.peek_byte()? != b'e' {
            items.push(self.decode_value()?);
        }

        // skip 'e'
        self.stream.read_byte()?;

        Ok(BdecodeValue::List(items))
    }
}

pub(super) fn to_json_with_style(items: &[BdecodeValue], style: Style) -> String {
    if items.is_empty() {
        return "[]".into();
    }

    match style {
        Style::Compact => {
            let items = items.iter().map(|v| v.to_json()).collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        Style::Pretty(span) => {
            let blanks = gen_blanks(span + 2);
            let items = items
                .iter()
                .map(|v| format!("{}{}", blanks, v.to_json_with_style(Style::Pretty(span + 2))))
                .collect::<Vec<_>>();

            format!("[\n{}\n{}]", items.join(",\n"), gen_blanks(span))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{decode_str, BdecodeValue, Style};

    #[test]
    fn test_list_item() {
        // [19, "ab", {"k1": "v1", "k2": [1, 2]}]
        let buffer = "l i19e 2:ab d 2:k1 2:v1 2:k2 l i1e i2e e e e".replace(' ', "");
        let value = decode_str(&buffer).unwrap();
        assert_eq!(Some(3), value.len());
        assert_eq!(Some(19), value.list_item(0).and_then(BdecodeValue::as_int));
        assert_eq!(Some("ab"), value.list_item(1).and_then(BdecodeValue::as_str));

        let item_2 = value.list_item(2).unwrap();
        assert!(matches!(item_2, BdecodeValue::Dict(_)));
        assert_eq!(Some(2), item_2.len());
    }

    #[test]
    fn test_empty_list() {
        let value = decode_str("le").unwrap();
        assert_eq!(Some(true), value.is_empty());
        assert_eq!("[]", value.to_json());
        assert_eq!("[]", value.to_json_with_style(Style::Pretty(4)));
    }

    #[test]
    fn test_pretty() {
        let value = decode_str("li1eli2eee").unwrap();
        assert_eq!("[1, [2]]", value.to_json());
        assert_eq!("[\n  1,\n  [\n    2\n  ]\n]", value.to_json_pretty());
    }
}
