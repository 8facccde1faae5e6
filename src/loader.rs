use hero_core::{LoadError, LoadOutcome, Model};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> LoadError {
    LoadError::Fetch(format!("{:?}", e))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let win = web::window().ok_or_else(|| LoadError::Fetch("no window".to_string()))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        return Err(LoadError::Http {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    let buf_promise = resp.array_buffer().map_err(js_err)?;
    let buf_val = JsFuture::from(buf_promise).await.map_err(js_err)?;
    let u8 = js_sys::Uint8Array::new(&buf_val);
    let mut out = vec![0u8; u8.length() as usize];
    u8.copy_to(&mut out);
    Ok(out)
}

/// Fetch and parse the subject model. Never retries.
pub async fn load_model(url: &str) -> LoadOutcome {
    log::info!("[loader] fetching {}", url);
    match fetch_bytes(url).await.and_then(|bytes| Model::from_glb(&bytes)) {
        Ok(model) => {
            log::info!("[loader] {} triangles", model.triangle_count());
            LoadOutcome::Loaded(model)
        }
        Err(e) => LoadOutcome::Failed(e),
    }
}
