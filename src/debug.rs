use num_traits::Float;
use pretty_dtoa::{dtoa, FmtFloatConfig};

const FLOAT_CONFIG: FmtFloatConfig = FmtFloatConfig::default()
    .add_point_zero(false)
    .max_significant_digits(9);

pub fn format_f64<T: Float>(v: T) -> String {
    dtoa(v.to_f64().unwrap_or(f64::NAN), FLOAT_CONFIG)
}

pub fn format_f64_vec<T: Float>(v: &[T]) -> String {
    let a: Vec<String> = v.iter().map(|&f| format_f64(f)).collect();
    format!("[{}]", a.join(", "))
}

pub fn format_f64_mat<T: Float>(m: &[Vec<T>]) -> String {
    let rows: Vec<String> = m.iter().map(|row| format_f64_vec(row)).collect();
    format!("[{}]", rows.join(", "))
}
