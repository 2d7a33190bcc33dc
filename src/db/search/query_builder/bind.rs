use super::BindValue;

pub(super) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

pub(super) fn push_text_array(bind_params: &mut Vec<BindValue>, value: Vec<String>) -> usize {
    bind_params.push(BindValue::TextArray(value));
    bind_params.len()
}

pub(super) fn push_int(bind_params: &mut Vec<BindValue>, value: i64) -> usize {
    bind_params.push(BindValue::Int(value));
    bind_params.len()
}

pub(super) fn push_int_array(bind_params: &mut Vec<BindValue>, value: Vec<i64>) -> usize {
    bind_params.push(BindValue::IntArray(value));
    bind_params.len()
}

pub(super) fn push_float(bind_params: &mut Vec<BindValue>, value: f64) -> usize {
    bind_params.push(BindValue::Float(value));
    bind_params.len()
}

pub(super) fn push_bool(bind_params: &mut Vec<BindValue>, value: bool) -> usize {
    bind_params.push(BindValue::Bool(value));
    bind_params.len()
}
