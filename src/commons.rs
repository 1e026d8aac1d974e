/// 阈值常量
pub mod limits {
    /// 解析时 dict 和 list 的最大嵌套深度限制。
    pub const DEFAULT_DEPTH_LIMIT: usize = 100;

    /// 整数或字符串长度所允许的最大有效数字个数，不含负号和前导零。
    /// u64 的最大值 "18446744073709551615" 正好 20 位。
    pub const MAX_NUMBER_DIGITS: usize = 20;

    /// 整数或字符串长度 token 的最大字节数，包括前导零。
    pub const MAX_NUMBER_LEN: usize = 256;
}

/// 值类型
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ValueType {
    /// 字典
    Dict = 1,
    /// 列表
    List,
    /// 字符串
    Str,
    /// 整型
    Int,
}

impl ValueType {
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Self::Dict),
            2 => Some(Self::List),
            3 => Some(Self::Str),
            4 => Some(Self::Int),
            _ => None,
        }
    }

    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Dict => "dict",
            Self::List => "list",
            Self::Str => "string",
            Self::Int => "integer",
        }
    }
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
