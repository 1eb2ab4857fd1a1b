use std::ffi::OsString;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use crate::lib_constants::TMP_FILENAME_INFIX;

/// `<path>.tmp.<uuid>`, next to `path`.
pub fn tmp_path_for(path: &Path, uuid: Uuid) -> PathBuf {
    let mut file_name = OsString::from(path.as_os_str());
    file_name.push(TMP_FILENAME_INFIX);
    file_name.push(uuid.hyphenated().to_string());
    file_name.into()
}
