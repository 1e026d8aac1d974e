use ez_bdecode::decode_str;

fn main() {
    let buf = "d 2:k1 2:v1 2:k2 l i1e i2e e 3:k03 i3e 2:k4 d 2:k5 i5e 2:k6 i6e e e".replace(' ', "");

    let root = decode_str(&buf).unwrap();
    println!("{}", root.to_json());

    let k2 = root.dict_find(b"k2").unwrap();
    println!("{}", k2.to_json());

    for (i, item) in k2.as_list().unwrap_or_default().iter().enumerate() {
        println!("item_{} = {}", i, item.as_int().unwrap());
    }
}
