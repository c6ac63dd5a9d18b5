//! WebView shell application using `wry` + `tao`.
//!
//! Architecture:
//! - One tao window hosts one WebView; tabs are virtual. The shell core
//!   tracks per-tab state through [`ProxySurface`]s, which mirror navigation
//!   locally and forward the resulting commands to the webview over the
//!   event-loop proxy.
//! - Chrome (tab strip, address bar) is injected on every page via
//!   `with_initialization_script` and talks back over wry IPC using the
//!   `{"cmd": ...}` messages in [`crate::ipc`].
//! - Popups and target=_blank are denied at the view layer and re-enter the
//!   shell as tab-open intents.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::app::Shell;
use crate::ipc::{ChromeNotification, ChromeRequest};
use crate::managers::tab_registry::TabRegistryTrait;
use crate::surface::{ContentSurface, HeadlessSurface, LifecycleEvent, SurfaceFactory};
use crate::types::window::{WindowId, WindowKind};

#[derive(Debug, PartialEq)]
enum UserEvent {
    LoadUrl(String),
    EvalScript(String),
    SetZoom(f64),
    /// Chrome window buttons acting on the native tao window.
    Minimize,
    SetMaximized(bool),
    /// A denied popup re-routed as a tab in the originating window.
    OpenTab(String),
    /// Page load progress from the view, mapped onto the active tab.
    PageLoad { finished: bool },
}

/// Content surface bridging the core to the single shared webview.
///
/// Keeps a simulated back/forward stack (so `can_go_back`/`can_go_forward`
/// answer synchronously) and forwards every command to the event loop, which
/// applies it to the webview when this surface's tab is active.
struct ProxySurface {
    sim: HeadlessSurface,
    proxy: EventLoopProxy<UserEvent>,
}

impl ContentSurface for ProxySurface {
    fn load(&mut self, url: &str) {
        self.sim.load(url);
        let _ = self.proxy.send_event(UserEvent::LoadUrl(url.to_string()));
    }

    fn reload(&mut self) {
        self.sim.reload();
        let _ = self.proxy.send_event(UserEvent::LoadUrl(self.sim.url()));
    }

    fn go_back(&mut self) {
        self.sim.go_back();
        let _ = self.proxy.send_event(UserEvent::LoadUrl(self.sim.url()));
    }

    fn go_forward(&mut self) {
        self.sim.go_forward();
        let _ = self.proxy.send_event(UserEvent::LoadUrl(self.sim.url()));
    }

    fn can_go_back(&self) -> bool {
        self.sim.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.sim.can_go_forward()
    }

    fn url(&self) -> String {
        self.sim.url()
    }

    fn title(&self) -> String {
        self.sim.title()
    }

    fn is_ready(&self) -> bool {
        self.sim.is_ready()
    }

    fn mark_ready(&mut self) {
        self.sim.mark_ready();
    }

    fn zoom_factor(&self) -> f64 {
        self.sim.zoom_factor()
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.sim.set_zoom_factor(factor);
        let _ = self.proxy.send_event(UserEvent::SetZoom(factor));
    }
}

struct ProxyFactory {
    proxy: EventLoopProxy<UserEvent>,
}

impl SurfaceFactory for ProxyFactory {
    fn create(&mut self, _kind: WindowKind, url: &str) -> Box<dyn ContentSurface> {
        Box::new(ProxySurface {
            sim: HeadlessSurface::new(url),
            proxy: self.proxy.clone(),
        })
    }
}

struct ShellState {
    shell: Shell,
    window_id: WindowId,
}

/// Chrome JS injected on every page: renders the tab strip, forwards user
/// actions as IPC commands, and applies state pushed back via
/// `__prism_apply` / `__prism_notify`.
const CHROME_JS: &str = r#"
(function(){
  if (window.__prism_chrome) return;
  window.__prism_chrome = true;
  function send(msg){ if (window.ipc) window.ipc.postMessage(JSON.stringify(msg)); }
  window.__prism_apply = function(state){
    var strip = document.getElementById('__prism_tabs');
    if (!strip) return;
    strip.innerHTML = '';
    state.tabs.forEach(function(t){
      var el = document.createElement('span');
      el.textContent = t.title || t.url;
      el.className = t.id === state.active ? 'prism-tab active' : 'prism-tab';
      el.onclick = function(){ send({cmd:'select_tab', id:t.id}); };
      strip.appendChild(el);
    });
  };
  window.__prism_notify = function(n){
    if (n.event === 'maximize_state_changed') {
      document.documentElement.dataset.prismMaximized = n.maximized;
    }
  };
  document.addEventListener('keydown', function(e){
    if (!e.ctrlKey) return;
    if (e.key === 't') { send({cmd:'new_tab'}); e.preventDefault(); }
    if (e.key === 'l') {
      var input = prompt('Open:');
      if (input !== null) send({cmd:'navigate', input:input});
      e.preventDefault();
    }
  });
  send({cmd:'query_is_maximized'});
})();
"#;

/// Native window commands a chrome request carries beyond the core state
/// change. Minimize acts on the tao window only; a maximize toggle applies
/// the core's new state to the tao window. Passive queries have none.
fn native_effects(
    request: &ChromeRequest,
    notification: Option<&ChromeNotification>,
) -> Vec<UserEvent> {
    match request {
        ChromeRequest::Minimize => vec![UserEvent::Minimize],
        ChromeRequest::MaximizeToggle => match notification {
            Some(ChromeNotification::MaximizeStateChanged { maximized }) => {
                vec![UserEvent::SetMaximized(*maximized)]
            }
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn handle_request(state: &mut ShellState, message: &str) -> Vec<UserEvent> {
    let request: ChromeRequest = match serde_json::from_str(message) {
        Ok(r) => r,
        Err(e) => {
            log::debug!("ignoring malformed chrome message: {}", e);
            return Vec::new();
        }
    };
    // Requests that change which tab is active need the webview re-pointed
    // at the new active tab's url; navigation itself flows through the
    // surfaces.
    let switches_tab = matches!(
        request,
        ChromeRequest::NewTab | ChromeRequest::CloseTab { .. } | ChromeRequest::SelectTab { .. }
    );
    let window_id = state.window_id.clone();
    let outcome = state.shell.handle_chrome(&window_id, request.clone());
    let mut events = native_effects(&request, outcome.as_ref().map(|(_, n)| n));
    if let Some((target, n)) = &outcome {
        if target == &window_id {
            events.push(UserEvent::EvalScript(notify_script(n)));
        } else {
            // Core windows beyond the first have no native view here.
            log::debug!("dropping notification for viewless window {}", target);
        }
    }
    if switches_tab {
        if let Some(url) = active_url(state) {
            events.push(UserEvent::LoadUrl(url));
        }
    }
    events
}

fn active_url(state: &ShellState) -> Option<String> {
    state
        .shell
        .window(&state.window_id)
        .and_then(|w| w.tabs().active())
        .map(|t| t.url.clone())
}

fn notify_script(notification: &ChromeNotification) -> String {
    let json = serde_json::to_string(notification).unwrap_or_default();
    format!("if(window.__prism_notify)__prism_notify({})", json)
}

fn tabs_script(state: &ShellState) -> String {
    let Some(window) = state.shell.window(&state.window_id) else {
        return String::new();
    };
    let tabs: Vec<serde_json::Value> = window
        .tabs()
        .tabs()
        .iter()
        .map(|t| serde_json::json!({"id": t.id, "title": t.title, "url": t.url}))
        .collect();
    let active = window.tabs().active_id();
    format!(
        "if(window.__prism_apply)__prism_apply({})",
        serde_json::json!({"tabs": tabs, "active": active})
    )
}

// ─── Main entry point ───

pub fn run() {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let mut shell = Shell::new(Box::new(ProxyFactory {
        proxy: proxy.clone(),
    }));
    let window_id = shell.create_window(WindowKind::Default);
    let start_url = shell
        .window(&window_id)
        .and_then(|w| w.tabs().active())
        .map(|t| t.url.clone())
        .unwrap_or_else(|| "about:blank".to_string());
    let bounds = shell
        .window(&window_id)
        .map(|w| w.bounds())
        .unwrap_or_default();

    let state = Arc::new(Mutex::new(ShellState { shell, window_id }));

    let window = WindowBuilder::new()
        .with_title("Prism Shell")
        .with_position(tao::dpi::LogicalPosition::new(bounds.x as f64, bounds.y as f64))
        .with_inner_size(tao::dpi::LogicalSize::new(
            bounds.width as f64,
            bounds.height as f64,
        ))
        .build(&event_loop)
        .expect("Failed to create window");

    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();
    let nw_proxy = proxy.clone();
    let load_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_initialization_script(CHROME_JS)
        .with_url(&start_url)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            // A fault in dispatch must not take the event loop down.
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let mut s = ipc_state.lock().unwrap();
                let events = handle_request(&mut s, body);
                (events, tabs_script(&s))
            }));
            match outcome {
                Ok((events, tabs)) => {
                    for event in events {
                        let _ = ipc_proxy.send_event(event);
                    }
                    let _ = ipc_proxy.send_event(UserEvent::EvalScript(tabs));
                }
                Err(_) => log::error!("chrome dispatch panicked; message dropped"),
            }
        })
        .with_on_page_load_handler(move |event, _url| {
            let finished = matches!(event, wry::PageLoadEvent::Finished);
            let _ = load_proxy.send_event(UserEvent::PageLoad { finished });
        })
        .with_new_window_req_handler(move |url, _features| {
            if url.starts_with("http://") || url.starts_with("https://") {
                let _ = nw_proxy.send_event(UserEvent::OpenTab(url));
            }
            wry::NewWindowResponse::Deny
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().expect("Failed to get GTK vbox");
        builder.build_gtk(vbox).expect("Failed to create WebView")
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).expect("Failed to create WebView");

    let mut last_tick = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        // Drive debounced saves and zoom retries off wall-clock time.
        let elapsed = last_tick.elapsed().as_millis() as u64;
        if elapsed > 0 {
            last_tick = Instant::now();
            state.lock().unwrap().shell.tick(elapsed);
        }

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    let mut s = state.lock().unwrap();
                    let id = s.window_id.clone();
                    s.shell.close_window(&id);
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Moved(position) => {
                    let mut s = state.lock().unwrap();
                    let id = s.window_id.clone();
                    if let Some(w) = s.shell.window_mut(&id) {
                        let mut b = w.bounds();
                        b.x = position.x;
                        b.y = position.y;
                        w.moved_or_resized(b);
                    }
                }
                WindowEvent::Resized(size) => {
                    let mut s = state.lock().unwrap();
                    let id = s.window_id.clone();
                    let maximized = window.is_maximized();
                    if let Some(w) = s.shell.window_mut(&id) {
                        let mut b = w.bounds();
                        b.width = size.width;
                        b.height = size.height;
                        w.moved_or_resized(b);
                        if let Some(n) = w.set_maximized(maximized) {
                            let _ = proxy.send_event(UserEvent::EvalScript(notify_script(&n)));
                        }
                    }
                }
                _ => {}
            },

            Event::UserEvent(user_event) => match user_event {
                UserEvent::LoadUrl(url) => {
                    let _ = webview.load_url(&url);
                }
                UserEvent::EvalScript(js) => {
                    if !js.is_empty() {
                        let _ = webview.evaluate_script(&js);
                    }
                }
                UserEvent::SetZoom(factor) => {
                    let _ = webview.zoom(factor);
                }
                UserEvent::Minimize => {
                    window.set_minimized(true);
                }
                UserEvent::SetMaximized(maximized) => {
                    window.set_maximized(maximized);
                }
                UserEvent::OpenTab(url) => {
                    let mut s = state.lock().unwrap();
                    let id = s.window_id.clone();
                    let intent = s
                        .shell
                        .window(&id)
                        .map(|w| w.popup_request(&url));
                    if let Some(intent) = intent {
                        if s.shell.open_tab(intent).is_some() {
                            let notify = notify_script(&ChromeNotification::OpenNewTab {
                                url: url.clone(),
                            });
                            let tabs = tabs_script(&s);
                            let _ = proxy.send_event(UserEvent::EvalScript(notify));
                            let _ = proxy.send_event(UserEvent::EvalScript(tabs));
                            let _ = proxy.send_event(UserEvent::LoadUrl(url));
                        }
                    }
                }
                UserEvent::PageLoad { finished } => {
                    let mut s = state.lock().unwrap();
                    let id = s.window_id.clone();
                    if let Some(active) = s.shell.window(&id).and_then(|w| w.tabs().active_id()) {
                        if finished {
                            s.shell.handle_lifecycle(&id, active, LifecycleEvent::Ready);
                            s.shell.handle_lifecycle(&id, active, LifecycleEvent::LoadFinished);
                        } else {
                            s.shell.handle_lifecycle(&id, active, LifecycleEvent::LoadStarted);
                        }
                        let tabs = tabs_script(&s);
                        let _ = proxy.send_event(UserEvent::EvalScript(tabs));
                    }
                }
            },

            _ => {}
        }
    });
}
