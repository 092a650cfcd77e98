//! JavaScript side of the panel bridge.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: page code calls `window.panelAPI.*`, which posts a
//!   request envelope through `window.ipc.postMessage` and returns a Promise.
//! - **Rust -> JS**: the host evaluates `window.__rpaBridge._resolve(reply)`
//!   to settle that Promise, or `window.__rpaBridge._push(push)` for
//!   unsolicited events.
//!
//! `panelAPI` is frozen before any page script runs. wry still exposes
//! `window.ipc` to the page, so the boundary is enforced on the host: only
//! the allowlisted operations are dispatched and everything else is
//! rejected.

use rpa_bridge::{IpcPush, IpcReply};

/// Injected into the WebView before any page script.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    if (window.panelAPI) { return; }

    var post = window.ipc.postMessage.bind(window.ipc);
    var pending = {};
    var listeners = {};
    var nextId = 1;

    function invoke(kind, payload) {
        return new Promise(function(resolve, reject) {
            var id = nextId++;
            pending[id] = { resolve: resolve, reject: reject };
            post(JSON.stringify({
                id: id,
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        });
    }

    var bridge = Object.freeze({
        _resolve: function(reply) {
            var entry = pending[reply.id];
            if (!entry) { return; }
            delete pending[reply.id];
            if (Object.prototype.hasOwnProperty.call(reply, 'ok')) {
                entry.resolve(reply.ok);
            } else {
                entry.reject(new Error(reply.error || 'bridge error'));
            }
        },
        _push: function(push) {
            var list = (listeners[push.channel] || []).slice();
            for (var i = 0; i < list.length; i++) {
                try { list[i](push.payload); } catch (e) { console.error(e); }
            }
        }
    });

    var api = Object.freeze({
        saveSettings: function(settings) { return invoke('saveSettings', settings); },
        loadSettings: function() { return invoke('loadSettings', null); },
        processGroupData: function(data) { return invoke('processGroupData', data); },
        onElementEvent: function(callback) {
            (listeners['element-event'] = listeners['element-event'] || []).push(callback);
        },
        removeAllListeners: function(channel) { delete listeners[channel]; }
    });

    Object.defineProperty(window, '__rpaBridge', { value: bridge, writable: false, configurable: false });
    Object.defineProperty(window, 'panelAPI', { value: api, writable: false, configurable: false });
})();
"#;

/// Script that settles the pending JS call matching an encoded reply.
///
/// Returns `None` when `raw` is not a reply envelope, so arbitrary text is
/// never evaluated in the page.
pub fn js_resolve_reply(raw: &str) -> Option<String> {
    let reply: IpcReply = serde_json::from_str(raw).ok()?;
    let json = serde_json::to_string(&reply).ok()?;
    Some(format!("window.__rpaBridge._resolve({json});"))
}

/// Script that delivers a push to every JS listener on its channel.
pub fn js_push(push: &IpcPush) -> String {
    let json = serde_json::to_string(push).unwrap_or_else(|_| "null".to_string());
    format!("window.__rpaBridge._push({json});")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn init_script_exposes_only_the_bridge_operations() {
        for name in [
            "saveSettings",
            "loadSettings",
            "processGroupData",
            "onElementEvent",
            "removeAllListeners",
        ] {
            assert!(BRIDGE_INIT_SCRIPT.contains(name), "missing {name}");
        }
        assert!(BRIDGE_INIT_SCRIPT.contains("Object.freeze"));
        assert!(BRIDGE_INIT_SCRIPT.contains("writable: false"));
    }

    #[test]
    fn resolve_reply_wraps_envelope() {
        let js = js_resolve_reply(r#"{"id":3,"ok":{"success":true}}"#).unwrap();
        assert!(js.starts_with("window.__rpaBridge._resolve("));
        assert!(js.contains(r#""id":3"#));
        assert!(js.ends_with(");"));
    }

    #[test]
    fn resolve_reply_refuses_non_envelopes() {
        assert!(js_resolve_reply("alert(1)").is_none());
        assert!(js_resolve_reply(r#"{"ok":true}"#).is_none());
    }

    #[test]
    fn push_script_names_channel() {
        let push = IpcPush {
            channel: "element-event".into(),
            payload: json!({ "id": "element-1" }),
        };
        let js = js_push(&push);
        assert!(js.starts_with("window.__rpaBridge._push("));
        assert!(js.contains("element-event"));
        assert!(js.contains("element-1"));
    }
}
