use crate::stream::ByteStream;

use super::{
    utils::{parse_number, read_until},
    BdecodeResult, BdecodeValue, Decoder,
};

impl<S: ByteStream> Decoder<S> {
    /// 解析 `i<整数>e`
    pub(super) fn decode_int(&mut self) -> BdecodeResult<BdecodeValue> {
        // skip 'i'
        self.stream.read_byte()?;

        let start = self.stream.position();
        let token = read_until(&mut self.stream, b'e')?;
        let val = parse_number::<i64>(&token, start)?;

        Ok(BdecodeValue::Int(val))
    }
}
