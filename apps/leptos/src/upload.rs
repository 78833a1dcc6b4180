use trials_core::UploadFile;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// First file selected in `input`, read fully into memory
pub async fn read_first_file(input: &HtmlInputElement) -> Option<UploadFile> {
    let file = input.files()?.item(0)?;
    let name = file.name();
    match JsFuture::from(file.array_buffer()).await {
        Ok(buf) => {
            let bytes = js_sys::Uint8Array::new(&buf).to_vec();
            Some(UploadFile::new(name, bytes))
        }
        Err(e) => {
            log::error!("Could not read {}: {:?}", name, e);
            None
        }
    }
}
