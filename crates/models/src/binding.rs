//! Named-parameter resolution for raw SQL.
//!
//! The backing driver only understands positional placeholders, so queries
//! written with `:name` markers are rewritten here: each marker becomes the
//! backend's positional placeholder, with values ordered by first use. A
//! marker may appear more than once; it binds the same value each time.
//! Postgres `::type` casts and single-quoted literals are left untouched.

use sea_orm::{DatabaseBackend, Statement, Value};

use crate::errors::ModelError;

/// Rewrite `sql` containing `:name` markers into a positional [`Statement`].
///
/// Every marker must match a supplied parameter and every parameter must be
/// used at least once; either mismatch is a validation error, since it means
/// the query text and its arguments disagree.
pub fn named(
    backend: DatabaseBackend,
    sql: &str,
    params: &[(&str, Value)],
) -> Result<Statement, ModelError> {
    let mut out = String::with_capacity(sql.len());
    // parameter slots in order of first appearance: (name, position in `params`)
    let mut slots: Vec<usize> = Vec::new();
    let mut used = vec![false; params.len()];

    let mut chars = sql.char_indices().peekable();
    let mut in_string = false;
    while let Some((i, c)) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\'' {
                in_string = false;
            }
            continue;
        }
        match c {
            '\'' => {
                in_string = true;
                out.push(c);
            }
            ':' => {
                // `::` is a cast, not a parameter
                if matches!(chars.peek(), Some(&(_, ':'))) {
                    chars.next();
                    out.push_str("::");
                    continue;
                }
                let start = i + 1;
                let mut end = start;
                while let Some(&(j, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    end = j + next.len_utf8();
                    chars.next();
                }
                if end == start {
                    out.push(c);
                    continue;
                }
                let name = &sql[start..end];
                let idx = params
                    .iter()
                    .position(|(n, _)| *n == name)
                    .ok_or_else(|| {
                        ModelError::Validation(format!("unknown named parameter :{name}"))
                    })?;
                used[idx] = true;
                let ordinal = match slots.iter().position(|&s| s == idx) {
                    Some(seen) => seen + 1,
                    None => {
                        slots.push(idx);
                        slots.len()
                    }
                };
                out.push_str(&placeholder(backend, ordinal));
            }
            _ => {
                out.push(c);
            }
        }
    }

    if let Some(pos) = used.iter().position(|u| !u) {
        return Err(ModelError::Validation(format!(
            "unused named parameter {}",
            params[pos].0
        )));
    }

    let values: Vec<Value> = slots.iter().map(|&idx| params[idx].1.clone()).collect();
    Ok(Statement::from_sql_and_values(backend, out, values))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn placeholder(backend: DatabaseBackend, ordinal: usize) -> String {
    match backend {
        DatabaseBackend::Postgres => format!("${ordinal}"),
        _ => "?".to_string(),
    }
}
