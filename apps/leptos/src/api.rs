//! HTTP binding of the trials collaborator

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use trials_core::api::{decode_body, status_error, UPLOAD_FIELD};
use trials_core::{
    ApiConfig, ApiError, ApiResponse, SimulationRequest, SimulationResult, TrialPage, TrialsApi,
    UploadFile,
};
use wasm_bindgen::JsValue;
use web_sys::{Blob, FormData};

#[derive(Clone, Debug)]
pub struct HttpTrialsApi {
    config: ApiConfig,
}

impl HttpTrialsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn fetch_trial_data(&self, file: Option<UploadFile>) -> Result<TrialPage, ApiError> {
        let url = self.config.trial_data_url();
        let request = match file {
            None => Request::get(&url).build(),
            Some(file) => Request::post(&url).body(upload_form(&file)?),
        }
        .map_err(transport)?;

        let response = request.send().await.map_err(transport)?;
        read_json(response, "Trial data").await
    }

    async fn fetch_simulation(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, ApiError> {
        let response = Request::post(&self.config.digital_twin_url())
            .json(request)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response, "Simulation").await
    }
}

impl TrialsApi for HttpTrialsApi {
    async fn get_trial_data(&self, file: Option<UploadFile>) -> ApiResponse<TrialPage> {
        ApiResponse::from_result(self.fetch_trial_data(file).await)
    }

    async fn run_digital_twin_simulation(
        &self,
        request: SimulationRequest,
    ) -> ApiResponse<SimulationResult> {
        ApiResponse::from_result(self.fetch_simulation(&request).await)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
    let body = response.text().await.map_err(transport)?;
    if !response.ok() {
        return Err(status_error(context, response.status(), &body));
    }
    decode_body(&body)
}

fn upload_form(file: &UploadFile) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let blob = Blob::new_with_u8_array_sequence(&js_sys::Array::of1(&bytes)).map_err(js_error)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
        .map_err(js_error)?;
    Ok(form)
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Thrown JS values only sometimes carry a message
fn js_error(value: JsValue) -> ApiError {
    value
        .as_string()
        .or_else(|| js_sys::Reflect::get(&value, &JsValue::from_str("message")).ok()?.as_string())
        .map_or(ApiError::Unknown, ApiError::Transport)
}
