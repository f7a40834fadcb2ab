use crate::query::Bind;
use bytes::BytesMut;
use tokio_postgres::types::IsNull;
use tokio_postgres::types::ToSql;
use tokio_postgres::types::Type;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Binds narrow or widen to whatever the server declared for the
/// placeholder, so callers never care whether a column is REAL or FLOAT8.
impl ToSql for Bind {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Self::Real(x) if *ty == Type::FLOAT4 => (*x as f32).to_sql(ty, out),
            Self::Real(x) => x.to_sql(ty, out),
            Self::Int(x) if *ty == Type::INT2 => i16::try_from(*x)?.to_sql(ty, out),
            Self::Int(x) if *ty == Type::INT4 => i32::try_from(*x)?.to_sql(ty, out),
            Self::Int(x) => x.to_sql(ty, out),
            Self::Ints(xs) if *ty == Type::INT2_ARRAY => xs
                .iter()
                .map(|x| i16::try_from(*x))
                .collect::<Result<Vec<i16>, _>>()?
                .to_sql(ty, out),
            Self::Ints(xs) if *ty == Type::INT4_ARRAY => xs
                .iter()
                .map(|x| i32::try_from(*x))
                .collect::<Result<Vec<i32>, _>>()?
                .to_sql(ty, out),
            Self::Ints(xs) => xs.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        [
            Type::FLOAT4,
            Type::FLOAT8,
            Type::INT2,
            Type::INT4,
            Type::INT8,
            Type::INT2_ARRAY,
            Type::INT4_ARRAY,
            Type::INT8_ARRAY,
        ]
        .contains(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}
