use log::warn;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

/// 複製檔案內容與中繼資料（權限、存取與修改時間）
///
/// 目標已存在時回傳 `AlreadyExists`，不會覆寫；
/// 建立目標之後的任何失敗都會移除不完整的目標檔
pub fn copy_with_metadata(source: &Path, target: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = File::create_new(target)?;

    let result = (|| -> io::Result<()> {
        let metadata = reader.metadata()?;
        io::copy(&mut reader, &mut writer)?;

        let mut times = FileTimes::new().set_modified(metadata.modified()?);
        if let Ok(accessed) = metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        writer.set_times(times)?;

        // 權限最後設定，唯讀來源不會擋住前面的寫入
        writer.set_permissions(metadata.permissions())
    })();

    if let Err(e) = result {
        drop(writer);
        if let Err(cleanup) = fs::remove_file(target) {
            warn!("無法移除不完整的檔案 {}: {cleanup}", target.display());
        }
        return Err(e);
    }

    Ok(())
}
