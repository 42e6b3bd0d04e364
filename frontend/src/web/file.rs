//! 文件读取封装
//!
//! 将 `<input type="file">` 选中的 `web_sys::File` 完整读入内存。

use super::http::HttpError;
use js_sys::Uint8Array;
use portal_shared::protocol::UploadFile;
use wasm_bindgen_futures::JsFuture;

/// 读取文件内容；浏览器未提供类型时使用 `application/octet-stream`
pub async fn read_file(file: &web_sys::File) -> Result<UploadFile, HttpError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| HttpError::RequestBuildFailed(format!("读取文件失败: {:?}", e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };

    Ok(UploadFile::new(file.name(), content_type, bytes))
}
