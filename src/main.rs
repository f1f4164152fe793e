fn main() {
    let v: f64 = 9.422750325201413;
    let s = serde_json::to_string(&v).unwrap();
    let back: f64 = serde_json::from_str(&s).unwrap();
    println!("s={} back_bits_eq={} back={:?}", s, back==v, back);
}
