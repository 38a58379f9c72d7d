use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const INDENT: &[u8] = b"    ";

/// Writes `T::default()` first if the file is missing.
pub fn load_or_init<T>(file_path: &Path) -> io::Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    if file_path.exists() {
        let raw = fs::read(file_path)?;
        return serde_json::from_slice(&raw)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e));
    }

    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let initial = T::default();
    write_pretty(file_path, &initial)?;
    tracing::info!("created {}", file_path.display());
    Ok(initial)
}

pub fn write_pretty<T>(file_path: &Path, value: &T) -> io::Result<()>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(io::Error::other)?;

    let tmp = tmp_path(file_path);
    fs::write(&tmp, &buf)?;
    fs::rename(&tmp, file_path)?;
    Ok(())
}

fn tmp_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
