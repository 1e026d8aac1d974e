use std::io::{self, Read};

use bytes::Bytes;

use crate::{BdecodeError, BdecodeResult};

/// 单次从 reader 预分配的最大字节数，防止恶意的字符串长度导致一次性分配过大内存。
const READ_CHUNK_LIMIT: usize = 64 * 1024;

/// 解码器读取的字节源。
///
/// 只要求顺序读取：读一个字节、窥视下一个字节（不消费）、读取恰好 N 个字节。
/// 任何读取点遇到输入结束都返回 [`BdecodeError::UnexpectedEof`]，
/// 其中携带的是出错时的字节位置。
pub trait ByteStream {
    /// 读取并消费一个字节
    fn read_byte(&mut self) -> BdecodeResult<u8>;

    /// 返回下一个字节但不消费它
    fn peek_byte(&mut self) -> BdecodeResult<u8>;

    /// 读取恰好 `len` 个字节，不足时报错而不是返回截断的结果
    fn read_bytes(&mut self, len: usize) -> BdecodeResult<Bytes>;

    /// 已经消费的字节数
    fn position(&self) -> usize;
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn read_byte(&mut self) -> BdecodeResult<u8> {
        (**self).read_byte()
    }

    fn peek_byte(&mut self) -> BdecodeResult<u8> {
        (**self).peek_byte()
    }

    fn read_bytes(&mut self, len: usize) -> BdecodeResult<Bytes> {
        (**self).read_bytes(len)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

/// 基于内存 buffer 的字节源
#[derive(Debug, Clone)]
pub struct SliceStream<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> SliceStream<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    /// 尚未消费的部分
    pub fn remaining(&self) -> &'a [u8] {
        &self.buffer[self.pos..]
    }
}

impl ByteStream for SliceStream<'_> {
    fn read_byte(&mut self) -> BdecodeResult<u8> {
        let t = self.peek_byte()?;
        self.pos += 1;

        Ok(t)
    }

    fn peek_byte(&mut self) -> BdecodeResult<u8> {
        self.buffer
            .get(self.pos)
            .copied()
            .ok_or(BdecodeError::UnexpectedEof(self.pos))
    }

    fn read_bytes(&mut self, len: usize) -> BdecodeResult<Bytes> {
        if len > self.buffer.len() - self.pos {
            return Err(BdecodeError::UnexpectedEof(self.buffer.len()));
        }

        let buf = Bytes::copy_from_slice(&self.buffer[self.pos..self.pos + len]);
        self.pos += len;

        Ok(buf)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// 基于 [`Read`] 的字节源，内部保留一个字节用于窥视。
///
/// 每次 `read_byte` 都会调用一次底层的 `read`，对文件或 socket 应先包一层
/// [`std::io::BufReader`]。
#[derive(Debug)]
pub struct ReaderStream<R> {
    reader: R,
    peeked: Option<u8>,
    pos: usize,
}

impl<R: Read> ReaderStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            pos: 0,
        }
    }

    /// 取回底层 reader。已经窥视但尚未消费的字节会被丢弃。
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> BdecodeResult<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> ByteStream for ReaderStream<R> {
    fn read_byte(&mut self) -> BdecodeResult<u8> {
        let t = self.peek_byte()?;
        self.peeked = None;
        self.pos += 1;

        Ok(t)
    }

    fn peek_byte(&mut self) -> BdecodeResult<u8> {
        if let Some(t) = self.peeked {
            return Ok(t);
        }

        match self.next_byte()? {
            Some(t) => {
                self.peeked = Some(t);
                Ok(t)
            }
            None => Err(BdecodeError::UnexpectedEof(self.pos)),
        }
    }

    fn read_bytes(&mut self, len: usize) -> BdecodeResult<Bytes> {
        let mut buf = Vec::with_capacity(len.min(READ_CHUNK_LIMIT));

        if len > 0 {
            if let Some(t) = self.peeked.take() {
                buf.push(t);
            }
        }

        let rest = (len - buf.len()) as u64;
        self.reader.by_ref().take(rest).read_to_end(&mut buf)?;
        self.pos += buf.len();

        if buf.len() < len {
            return Err(BdecodeError::UnexpectedEof(self.pos));
        }

        Ok(Bytes::from(buf))
    }

    fn position(&self) -> usize {
        self.pos
    }
}
