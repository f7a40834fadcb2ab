/// A value bound to one positional parameter.
///
/// Conversion to the wire type is deferred until the column type is
/// known (see the `ToSql` impl in [`crate::database`]), so a `Real`
/// bound against a `REAL` column travels as `f32` and against
/// `DOUBLE PRECISION` as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Real(f64),
    Int(i64),
    /// Array parameter, for `= ANY($n)` membership tests.
    Ints(Vec<i64>),
}

impl From<f64> for Bind {
    fn from(x: f64) -> Self {
        Self::Real(x)
    }
}
impl From<f32> for Bind {
    fn from(x: f32) -> Self {
        Self::Real(x as f64)
    }
}
impl From<i64> for Bind {
    fn from(x: i64) -> Self {
        Self::Int(x)
    }
}
impl From<i32> for Bind {
    fn from(x: i32) -> Self {
        Self::Int(x as i64)
    }
}
impl From<i16> for Bind {
    fn from(x: i16) -> Self {
        Self::Int(x as i64)
    }
}
impl From<Vec<i64>> for Bind {
    fn from(xs: Vec<i64>) -> Self {
        Self::Ints(xs)
    }
}
