use crate::value;

use rusqlite::types::Value as SqlValue;
use tabula_core::{
    stmt::{Params, Value},
    Error, Result,
};

/// Rewrites `:name` placeholders into positional `?` placeholders and
/// collects the bound values in placeholder order.
///
/// A list value expands into one placeholder per item. An empty list
/// becomes `NULL`, so `x IN (:ids)` matches nothing. Placeholders inside
/// quoted literals and identifiers, and `::` casts, are left alone.
pub(crate) fn expand(sql: &str, params: &Params) -> Result<(String, Vec<SqlValue>)> {
    let mut out = String::with_capacity(sql.len());
    let mut values = vec![];
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                out.push(c);
            }
            ':' if chars.peek().is_some_and(|&(_, next)| next == ':') => {
                out.push_str("::");
                chars.next();
            }
            ':' if chars
                .peek()
                .is_some_and(|&(_, next)| next.is_ascii_alphabetic() || next == '_') =>
            {
                let start = i + 1;
                let mut end = start;

                while let Some(&(j, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        end = j + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }

                let name = &sql[start..end];
                let Some(value) = params.get(name) else {
                    return Err(Error::usage(format!("parameter `:{name}` is not bound")));
                };

                bind(value, &mut out, &mut values)?;
            }
            _ => out.push(c),
        }
    }

    Ok((out, values))
}

fn bind(value: &Value, out: &mut String, values: &mut Vec<SqlValue>) -> Result<()> {
    match value {
        Value::List(items) if items.is_empty() => out.push_str("NULL"),
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push('?');
                values.push(value::to_sql(item)?);
            }
        }
        value => {
            out.push('?');
            values.push(value::to_sql(value)?);
        }
    }

    Ok(())
}
