//! Scripts run in every page after it finishes loading.
//!
//! The client runtime comes first and owns `window.web4x.bridge`; the helper
//! library builds the page-facing globals on top of it. Both are safe to run
//! more than once in the same document.

/// Client side of the bridge: request ids, discovery, capability proxies and
/// event subscription.
pub const BRIDGE_CLIENT_SCRIPT: &str = r#"
(function() {
    window.web4x = window.web4x || {};
    if (window.web4x.bridge) {
        return;
    }

    var nextId = 1;
    var pending = {};
    var listeners = {};
    var readyCallbacks = [];

    function post(msg) {
        window.ipc.postMessage(JSON.stringify(msg));
    }

    function request(msg) {
        var id = nextId++;
        msg.id = id;
        return new Promise(function(resolve, reject) {
            pending[id] = { resolve: resolve, reject: reject };
            post(msg);
        });
    }

    function makeProxy(name, methods) {
        var proxy = {};
        methods.forEach(function(method) {
            proxy[method] = function() {
                return bridge.invoke(name, method, Array.prototype.slice.call(arguments));
            };
        });
        proxy.on = function(event, callback) {
            bridge.on(name, event, callback);
        };
        return proxy;
    }

    var bridge = {
        capabilities: null,
        objects: {},

        invoke: function(capability, method, args) {
            return request({
                kind: 'invoke',
                capability: capability,
                method: method,
                args: args || []
            });
        },

        on: function(capability, event, callback) {
            var key = capability + '.' + event;
            (listeners[key] = listeners[key] || []).push(callback);
        },

        ready: function(callback) {
            if (bridge.capabilities) {
                callback(bridge.objects);
            } else {
                readyCallbacks.push(callback);
            }
        },

        _receive: function(msg) {
            if (msg.kind === 'capabilities') {
                delete pending[msg.id];
                bridge.capabilities = msg.capabilities;
                Object.keys(msg.capabilities).forEach(function(name) {
                    bridge.objects[name] = makeProxy(name, msg.capabilities[name]);
                });
                var callbacks = readyCallbacks;
                readyCallbacks = [];
                callbacks.forEach(function(cb) { cb(bridge.objects); });
            } else if (msg.kind === 'reply') {
                var entry = pending[msg.id];
                if (!entry) {
                    return;
                }
                delete pending[msg.id];
                if (msg.error) {
                    entry.reject(new Error(msg.error));
                } else {
                    entry.resolve(msg.result);
                }
            } else if (msg.kind === 'event') {
                var handlers = listeners[msg.capability + '.' + msg.event] || [];
                handlers.forEach(function(cb) { cb(msg.payload); });
                document.dispatchEvent(new CustomEvent(msg.event, { detail: msg.payload }));
            }
        }
    };

    window.web4x.bridge = bridge;
    var discoverId = nextId++;
    pending[discoverId] = { resolve: function() {}, reject: function() {} };
    post({ kind: 'discover', id: discoverId });
})();
"#;

/// Page-facing helpers built on the client runtime.
pub const HELPER_LIBRARY_SCRIPT: &str = r#"
(function() {
    if (!window.web4x || !window.web4x.bridge || window.web4x.helpersInstalled) {
        return;
    }
    window.web4x.helpersInstalled = true;
    var bridge = window.web4x.bridge;

    function fs(method) {
        return function() {
            return bridge.invoke('fileSystemHandler', method, Array.prototype.slice.call(arguments));
        };
    }

    window.createFile = fs('createFile');
    window.createDirectory = fs('createDirectory');
    window.writeFile = fs('writeFile');
    window.changeFileContent = fs('changeFileContent');
    window.deleteFile = fs('deleteFile');
    window.deleteDirectory = fs('deleteDirectory');

    window.readFile = function(path) {
        return new Promise(function(resolve, reject) {
            bridge.invoke('fileSystemHandler', 'readFile', [path]).then(function(result) {
                if (result && typeof result.content === 'string') {
                    resolve(result.content);
                } else {
                    reject(new Error('could not read ' + path));
                }
            }, reject);
        });
    };

    window.openInNewTab = function(url) {
        return bridge.invoke('codeExecutor', 'executeSignal', [String(url)]);
    };

    window.add = function(fileOrText) {
        document.dispatchEvent(new CustomEvent('web4x:add', { detail: fileOrText }));
    };
})();
"#;

/// Both scripts in injection order.
pub fn injection_script() -> String {
    format!("{BRIDGE_CLIENT_SCRIPT}\n{HELPER_LIBRARY_SCRIPT}")
}

// =============================================================================
// TESTS
// =============================================================================
