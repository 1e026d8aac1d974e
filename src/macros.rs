/// 定义一个结构体，同时为它生成 [`MapTarget`](crate::MapTarget) 的字段描述表
/// 和 [`FromBdecode`](crate::FromBdecode)，使它可以作为其他目标的嵌套字段。
///
/// 字段默认按字段名查找，`=> "key"` 声明别名，声明后只按别名查找。
/// 结构体需要实现 `Default`，嵌套转换时从默认值开始填充。
///
/// ```
/// use ez_bdecode::{from_buffer, map_target};
///
/// map_target! {
///     #[derive(Debug, Default)]
///     pub struct Info {
///         pub name: String,
///         pub piece_length: i64 => "piece length",
///     }
/// }
///
/// let info: Info = from_buffer(b"d4:name5:a.txt12:piece lengthi16384ee").unwrap();
/// assert_eq!("a.txt", info.name);
/// assert_eq!(16384, info.piece_length);
/// ```
#[macro_export]
macro_rules! map_target {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $( => $key:literal )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::MapTarget for $name {
            fn fields() -> ::std::vec::Vec<$crate::Field<Self>> {
                ::std::vec![
                    $(
                        $crate::Field::new(
                            ::core::stringify!($field),
                            ::core::option::Option::None $( .or(::core::option::Option::Some($key)) )?,
                            |target: &mut Self, value: &$crate::BdecodeValue| {
                                target.$field = <$ty as $crate::FromBdecode>::from_bdecode(value)?;
                                ::core::result::Result::Ok(())
                            },
                        ),
                    )*
                ]
            }
        }

        impl $crate::FromBdecode for $name {
            fn from_bdecode(
                value: &$crate::BdecodeValue,
            ) -> ::core::result::Result<Self, $crate::MapError> {
                let mut target = <Self as ::core::default::Default>::default();
                $crate::map_to(value, &mut target)?;

                ::core::result::Result::Ok(target)
            }
        }
    };
}
