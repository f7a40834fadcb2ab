use super::*;
use crate::error::Error;
use crate::error::Result;
use crate::grid::Bounds;

/// Statement text with its positional parameters, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub binds: Vec<Bind>,
}

impl Query {
    pub fn sql(&self) -> &str {
        &self.sql
    }
    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }
}

/// Incremental `SELECT` builder. Every predicate is ANDed.
#[derive(Debug, Clone)]
pub struct Select {
    table: &'static str,
    columns: Vec<&'static str>,
    distinct: bool,
    predicates: Vec<String>,
    binds: Vec<Bind>,
    order: Vec<&'static str>,
}

impl Select {
    pub fn from(table: &'static str, columns: &[&'static str]) -> Self {
        Self {
            table,
            columns: columns.to_vec(),
            distinct: false,
            predicates: Vec::new(),
            binds: Vec::new(),
            order: Vec::new(),
        }
    }
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
    /// `key = $n`
    pub fn equals(mut self, key: &'static str, value: impl Into<Bind>) -> Self {
        let n = self.push(value.into());
        self.predicates.push(format!("{} = ${}", key, n));
        self
    }
    /// `key BETWEEN $n AND $n+1`, inclusive at both ends.
    pub fn between(mut self, key: &'static str, range: Bounds) -> Self {
        let lo = self.push(Bind::Real(range.lo()));
        let hi = self.push(Bind::Real(range.hi()));
        self.predicates
            .push(format!("{} BETWEEN ${} AND ${}", key, lo, hi));
        self
    }
    /// `key = ANY($n)` with a single array parameter.
    pub fn within(mut self, key: &'static str, ids: Vec<i64>) -> Self {
        let n = self.push(Bind::Ints(ids));
        self.predicates.push(format!("{} = ANY(${})", key, n));
        self
    }
    pub fn order_by(mut self, column: &'static str) -> Self {
        self.order.push(column);
        self
    }
    pub fn build(self) -> Query {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.columns.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(self.table);
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(", "));
        }
        Query {
            sql,
            binds: self.binds,
        }
    }
    fn push(&mut self, bind: Bind) -> usize {
        self.binds.push(bind);
        self.binds.len()
    }
}

/// Every row of `table`, projected onto `columns`. No parameters.
pub fn unconstrained_query(table: &'static str, columns: &[&'static str]) -> Query {
    Select::from(table, columns).build()
}

/// Rows whose every `keys[i]` lies inside `ranges[i]`.
pub fn ranged_query(
    table: &'static str,
    columns: &[&'static str],
    keys: &[&'static str],
    ranges: &[Bounds],
) -> Result<Query> {
    if keys.len() != ranges.len() {
        return Err(Error::configuration(format!(
            "ranged query on {}: {} keys but {} ranges",
            table,
            keys.len(),
            ranges.len()
        )));
    }
    Ok(keys
        .iter()
        .zip(ranges.iter())
        .fold(Select::from(table, columns), |q, (k, r)| q.between(*k, *r))
        .build())
}

/// Rows whose `id_column` is one of `ids`.
pub fn join_by_ids(
    table: &'static str,
    columns: &[&'static str],
    id_column: &'static str,
    ids: Vec<i64>,
) -> Result<Query> {
    if ids.is_empty() {
        return Err(Error::configuration(format!(
            "membership query on {}.{} with no ids",
            table, id_column
        )));
    }
    Ok(Select::from(table, columns).within(id_column, ids).build())
}

/// Rows whose every `keys[i]` equals `values[i]`.
pub fn equality_query(
    table: &'static str,
    columns: &[&'static str],
    keys: &[&'static str],
    values: Vec<Bind>,
) -> Result<Query> {
    if keys.len() != values.len() {
        return Err(Error::configuration(format!(
            "equality query on {}: {} keys but {} values",
            table,
            keys.len(),
            values.len()
        )));
    }
    Ok(keys
        .iter()
        .zip(values)
        .fold(Select::from(table, columns), |q, (k, v)| q.equals(*k, v))
        .build())
}

/// Distinct combinations of `columns`, sorted ascending.
pub fn distinct_query(table: &'static str, columns: &[&'static str]) -> Query {
    columns
        .iter()
        .fold(Select::from(table, columns).distinct(), |q, c| q.order_by(*c))
        .build()
}
