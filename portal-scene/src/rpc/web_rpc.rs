use crate::engine::systems::debug_settings::{DebugParam, DebugSettings};
use crate::engine::systems::frame_driver::FrameDriver;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[cfg(target_arch = "wasm32")]
use std::sync::{Arc, Mutex};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

const JSONRPC_VERSION: &str = "2.0";
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC 2.0 request. A request without `id` is a notification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// One-way message to the embedding page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: Some(json!({ "method": method })),
        }
    }
}

impl RpcResponse {
    fn new(id: Value, outcome: Result<Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            error,
            id: Some(id),
        }
    }
}

/// Anything the scene posts to its parent window.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
enum Outgoing {
    Notification(RpcNotification),
    Response(RpcResponse),
}

/// Outbox to the embedding page, flushed once per frame in arrival order.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outbox: Vec<Outgoing>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outbox.push(Outgoing::Notification(RpcNotification {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        }));
    }

    fn respond(&mut self, response: RpcResponse) {
        self.outbox.push(Outgoing::Response(response));
    }

    /// Notifications waiting for the next flush.
    #[cfg(test)]
    pub fn queued_notifications(&self) -> Vec<&RpcNotification> {
        self.outbox
            .iter()
            .filter_map(|message| match message {
                Outgoing::Notification(notification) => Some(notification),
                Outgoing::Response(_) => None,
            })
            .collect()
    }
}

/// postMessage bridge between the scene and the page embedding it.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<InboundRpc>()
            .add_systems(
                Update,
                (drain_inbox, dispatch_requests, flush_outbox).chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, listen_for_messages);
    }
}

/// Raw JSON text received from the parent window.
#[derive(Event)]
struct InboundRpc(String);

/// Messages pushed by the browser callback, taken each frame.
#[cfg(target_arch = "wasm32")]
#[derive(Resource, Clone, Default)]
struct Inbox(Arc<Mutex<Vec<String>>>);

#[cfg(target_arch = "wasm32")]
fn listen_for_messages(mut commands: Commands) {
    let inbox = Inbox::default();
    let sink = inbox.clone();

    let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |event: web_sys::MessageEvent| {
        let Ok(text) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };
        let text = String::from(text);
        if !text.contains("jsonrpc") {
            return;
        }
        if let Ok(mut queue) = sink.0.lock() {
            queue.push(text);
        }
    });

    let Some(window) = web_sys::window() else {
        error!("Window object not available, RPC bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Lives as long as the page.
    on_message.forget();
    commands.insert_resource(inbox);
}

#[cfg(target_arch = "wasm32")]
fn drain_inbox(inbox: Option<Res<Inbox>>, mut inbound: EventWriter<InboundRpc>) {
    let Some(inbox) = inbox else {
        return;
    };
    let messages = match inbox.0.lock() {
        Ok(mut queue) => std::mem::take(&mut *queue),
        Err(_) => return,
    };
    inbound.write_batch(messages.into_iter().map(InboundRpc));
}

#[cfg(not(target_arch = "wasm32"))]
fn drain_inbox() {}

fn dispatch_requests(
    mut inbound: EventReader<InboundRpc>,
    mut settings: ResMut<DebugSettings>,
    mut driver: ResMut<FrameDriver>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for InboundRpc(text) in inbound.read() {
        let request = match serde_json::from_str::<RpcRequest>(text) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("RPC request: {}", request.method);

        // Reads must not mark the settings as changed.
        let mut scratch = settings.clone();
        let response = handle_rpc_request(&request, &mut scratch, &mut driver);
        settings.set_if_neq(scratch);

        if let Some(response) = response {
            rpc_interface.respond(response);
        }
    }
}

/// Run one request. Only requests carrying an ID produce a response.
fn handle_rpc_request(
    request: &RpcRequest,
    settings: &mut DebugSettings,
    driver: &mut FrameDriver,
) -> Option<RpcResponse> {
    let outcome = match request.method.as_str() {
        "get_debug_settings" => Ok(settings.to_json()),
        "set_debug_setting" => set_debug_setting(&request.params, settings),
        "toggle_debug_panel" => {
            settings.panel_visible = !settings.panel_visible;
            Ok(json!({ "panel_visible": settings.panel_visible }))
        }
        "stop" => {
            driver.stop();
            Ok(json!({ "stopped": true }))
        }
        unknown => {
            warn!("Unknown RPC method: {}", unknown);
            Err(RpcError::method_not_found(unknown))
        }
    };

    request
        .id
        .clone()
        .map(|id| RpcResponse::new(id, outcome))
}

/// `{ "param": "<name>", "value": <number | "#rrggbb"> }`; numbers are clamped.
fn set_debug_setting(params: &Value, settings: &mut DebugSettings) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct SetDebugSetting {
        param: String,
        value: Value,
    }

    let SetDebugSetting { param, value } = serde_json::from_value(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'param' and 'value' parameters"))?;

    if param == "clear_colour" {
        let hex = value
            .as_str()
            .ok_or_else(|| RpcError::invalid_params("clear_colour expects a hex string"))?;
        settings
            .set_clear_colour(hex)
            .map_err(|error| RpcError::invalid_params(&error.to_string()))?;
        return Ok(json!({ "param": param, "value": hex }));
    }

    let parsed = param
        .parse::<DebugParam>()
        .map_err(|error| RpcError::invalid_params(&error.to_string()))?;
    let number = value
        .as_f64()
        .ok_or_else(|| RpcError::invalid_params(&format!("{param} expects a number")))?;
    let applied = settings.set(parsed, number as f32);

    Ok(json!({ "param": parsed.name(), "value": applied }))
}

fn flush_outbox(mut rpc_interface: ResMut<WebRpcInterface>) {
    for message in rpc_interface.outbox.drain(..) {
        post_to_parent(&message);
    }
}

#[cfg(target_arch = "wasm32")]
fn post_to_parent(message: &Outgoing) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize message: {}", e);
            return;
        }
    };
    let Some(parent) = web_sys::window().and_then(|window| window.parent().ok().flatten()) else {
        warn!("No parent window to post to");
        return;
    };
    if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
        error!("Failed to send message to parent: {:?}", e);
    }
}

// Native builds have no embedding page.
#[cfg(not(target_arch = "wasm32"))]
fn post_to_parent(message: &Outgoing) {
    trace!("RPC outbound dropped: {:?}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: serde_json::Value, id: Option<u64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: id.map(Into::into),
        }
    }

    fn call(
        method: &str,
        params: serde_json::Value,
        settings: &mut DebugSettings,
        driver: &mut FrameDriver,
    ) -> RpcResponse {
        handle_rpc_request(&request(method, params, Some(7)), settings, driver).unwrap()
    }

    #[test]
    fn get_debug_settings_reports_defaults() {
        let mut settings = DebugSettings::default();
        let response = call(
            "get_debug_settings",
            serde_json::Value::Null,
            &mut settings,
            &mut FrameDriver::default(),
        );

        let result = response.result.unwrap();
        assert_eq!(result["particle_size"], 100.0);
        assert_eq!(result["panel_visible"], false);
        assert_eq!(response.id, Some(7.into()));
    }

    #[test]
    fn set_debug_setting_clamps_value() {
        let mut settings = DebugSettings::default();
        let response = call(
            "set_debug_setting",
            serde_json::json!({ "param": "particle_size", "value": 900 }),
            &mut settings,
            &mut FrameDriver::default(),
        );

        assert_eq!(response.result.unwrap()["value"], 500.0);
        assert_eq!(settings.particle_size, 500.0);
    }

    #[test]
    fn bad_params_are_invalid_params_errors() {
        let mut settings = DebugSettings::default();
        let mut driver = FrameDriver::default();

        for params in [
            serde_json::json!({ "param": "fog", "value": 1 }),
            serde_json::json!({ "param": "light_x", "value": "far" }),
            serde_json::json!({ "param": "clear_colour", "value": "not a colour" }),
            serde_json::json!({ "value": 1 }),
        ] {
            let response = call("set_debug_setting", params, &mut settings, &mut driver);
            assert_eq!(response.error.unwrap().code, -32602);
        }
        assert_eq!(settings, DebugSettings::default());
    }

    #[test]
    fn clear_colour_accepts_hex() {
        let mut settings = DebugSettings::default();
        call(
            "set_debug_setting",
            serde_json::json!({ "param": "clear_colour", "value": "#000000" }),
            &mut settings,
            &mut FrameDriver::default(),
        );

        assert_eq!(settings.clear_colour, "#000000");
    }

    #[test]
    fn stop_halts_the_frame_driver() {
        let mut driver = FrameDriver::default();
        call(
            "stop",
            serde_json::Value::Null,
            &mut DebugSettings::default(),
            &mut driver,
        );

        assert!(driver.is_stopped());
    }

    #[test]
    fn notifications_run_without_response() {
        let mut settings = DebugSettings::default();
        let response = handle_rpc_request(
            &request("toggle_debug_panel", serde_json::Value::Null, None),
            &mut settings,
            &mut FrameDriver::default(),
        );

        assert!(response.is_none());
        assert!(settings.panel_visible);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let response = call(
            "get_fps",
            serde_json::Value::Null,
            &mut DebugSettings::default(),
            &mut FrameDriver::default(),
        );

        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn requests_parse_without_params() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"stop","id":1}"#).unwrap();

        assert_eq!(parsed.method, "stop");
        assert!(parsed.params.is_null());
    }
}
