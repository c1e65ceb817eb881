// ── Reply parsing ──
//
// The adapter answers every request with a single text line of
// comma-separated `key=value` tokens, e.g.
// `ret=OK,pow=1,mode=3,stemp=24.0,...`. Quoting follows CSV rules, so
// the line is split with a real CSV reader rather than `split(',')`.

use indexmap::IndexMap;

use crate::error::Error;

/// Field name of the status pseudo-field present in every reply.
pub const RET: &str = "ret";
/// Success marker carried in `ret`.
pub const RET_OK: &str = "OK";
/// Rejection marker carried in `ret` when a parameter is refused.
pub const RET_PARAM_NG: &str = "PARAM NG";

/// Raw reply fields in wire order. `ret` is kept as-is.
pub type FieldMap = IndexMap<String, String>;

/// Split one reply body into its fields.
///
/// Each token is split at its first `=`; anything after it (including
/// further `=` or `/`-joined sub-values) belongs to the value.
pub fn parse(body: &str) -> Result<FieldMap, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = reader.records();
    let record = match rows.next() {
        Some(row) => row.map_err(|e| malformed(format!("unreadable reply: {e}")))?,
        None => return Err(malformed("empty reply")),
    };
    let extra = rows.count();
    if extra > 0 {
        return Err(malformed(format!(
            "expected one row of fields, got {}",
            extra + 1
        )));
    }

    let mut fields = FieldMap::with_capacity(record.len());
    for token in &record {
        let Some((key, value)) = token.split_once('=') else {
            return Err(malformed(format!("token {token:?} has no '='")));
        };
        fields.insert(key.to_owned(), value.to_owned());
    }
    Ok(fields)
}

/// Fail with [`Error::DeviceRejected`] unless `ret` is absent or `OK`.
pub(crate) fn check_ret(fields: &FieldMap) -> Result<(), Error> {
    match fields.get(RET) {
        Some(ret) if ret != RET_OK => Err(Error::DeviceRejected { ret: ret.clone() }),
        _ => Ok(()),
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedResponse {
        message: message.into(),
    }
}
