use verity_types::{EqualMode, Member, Value};

/// Decide whether two inspected values are equal under `mode`.
///
/// [`EqualMode::Equals`] is plain structural equality of the trees.
/// [`EqualMode::FluentEquals`] relaxes it: numbers compare by value across
/// integer and float representations, sequences ignore their container
/// type, maps ignore entry order and struct members ignore declaration
/// order.
pub fn values_equal(a: &Value, b: &Value, mode: EqualMode) -> bool {
    match mode {
        EqualMode::Equals => a == b,
        EqualMode::FluentEquals => fluent_equals(a, b),
    }
}

fn fluent_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(_) | Value::UInt(_) | Value::Float(_), _) if b.is_number() => {
            numbers_equal(a, b)
        }
        (Value::Seq { items: xs, .. }, Value::Seq { items: ys, .. }) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| fluent_equals(x, y))
        }
        (Value::Map { entries: xs, .. }, Value::Map { entries: ys, .. }) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, v)| {
                    ys.iter()
                        .any(|(k2, v2)| fluent_equals(k, k2) && fluent_equals(v, v2))
                })
        }
        (
            Value::Struct {
                type_name: tx,
                members: mx,
                ..
            },
            Value::Struct {
                type_name: ty,
                members: my,
                ..
            },
        ) => tx == ty && members_equal(mx, my),
        (
            Value::Enum {
                type_name: tx,
                variant: vx,
                payload: px,
            },
            Value::Enum {
                type_name: ty,
                variant: vy,
                payload: py,
            },
        ) => {
            tx == ty
                && vx == vy
                && match (px, py) {
                    (Some(x), Some(y)) => fluent_equals(x, y),
                    (None, None) => true,
                    _ => false,
                }
        }
        _ => a == b,
    }
}

fn members_equal(xs: &[Member], ys: &[Member]) -> bool {
    xs.len() == ys.len()
        && xs.iter().all(|x| {
            ys.iter()
                .find(|y| y.name == x.name && y.kind == x.kind)
                .is_some_and(|y| fluent_equals(&x.value, &y.value))
        })
}

fn numbers_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::UInt(x), Value::UInt(y)) => x == y,
        (Value::Int(i), Value::UInt(u)) | (Value::UInt(u), Value::Int(i)) => {
            u128::try_from(*i).is_ok_and(|i| i == *u)
        }
        (Value::Float(f), Value::Float(g)) => f == g,
        (Value::Float(f), Value::Int(i)) | (Value::Int(i), Value::Float(f)) => {
            float_to_int(*f).is_some_and(|g| g == *i)
        }
        (Value::Float(f), Value::UInt(u)) | (Value::UInt(u), Value::Float(f)) => {
            float_to_uint(*f).is_some_and(|g| g == *u)
        }
        _ => false,
    }
}

// 2^127 and 2^128, exactly representable.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
const U128_LIMIT: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

/// The integer a float holds exactly, if any.
fn float_to_int(f: f64) -> Option<i128> {
    (f.is_finite() && f.fract() == 0.0 && (-I128_LIMIT..I128_LIMIT).contains(&f)).then(|| f as i128)
}

fn float_to_uint(f: f64) -> Option<u128> {
    (f.is_finite() && f.fract() == 0.0 && (0.0..U128_LIMIT).contains(&f)).then(|| f as u128)
}
