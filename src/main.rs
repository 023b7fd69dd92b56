#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use menu_shell::app::{
    self, dialog::NativeNotificationService, events::UserEvent, shell::ShellRequest, EventContext,
};
use menu_shell::config::{self, AppConfig};
use menu_shell::menu::{install_application_menu, Platform};
use menu_shell::platform::native::{forward_menu_events, NativeMenu, NativeMenuHost};
use menu_shell::platform::opener::SystemOpener;
use std::sync::Arc;
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::{Window, WindowBuilder},
};
use tracing_subscriber::EnvFilter;
use wry::WebViewBuilder;

const START_PAGE: &str = include_str!("ui/index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut app_config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {}", e);
        AppConfig::default()
    });

    #[cfg_attr(not(target_os = "windows"), allow(unused_mut))]
    let mut builder = EventLoopBuilder::<UserEvent>::with_user_event();
    #[cfg(target_os = "windows")]
    let accelerators = menu_shell::platform::native::translate_accelerators(&mut builder);
    let event_loop = builder.build();

    let (width, height) = app_config.window_size;
    let (pos_x, pos_y) = app_config.window_position;
    let (min_width, min_height) = app_config.min_window_size;

    let window = WindowBuilder::new()
        .with_title(&app_config.window_title)
        .with_inner_size(tao::dpi::LogicalSize::new(width, height))
        .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
        .with_min_inner_size(tao::dpi::LogicalSize::new(min_width, min_height))
        .build(&event_loop)?;

    let webview_builder =
        WebViewBuilder::new(&window).with_devtools(app_config.devtools_enabled);
    let webview_builder = match &app_config.start_url {
        Some(url) => {
            tracing::info!("Loading start page from {}", url);
            webview_builder.with_url(url)
        }
        None => webview_builder.with_html(START_PAGE),
    };
    let webview = webview_builder.build()?;

    let proxy = event_loop.create_proxy();
    forward_menu_events(proxy.clone());

    let platform = Platform::current();
    let notifications = NativeNotificationService;
    let mut installed: Option<NativeMenu> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                // macOS only accepts a main menu once NSApp has finished launching.
                let host = NativeMenuHost::new(&window, platform);
                match install_application_menu(&host, platform, Arc::new(SystemOpener)) {
                    Ok(menu) => {
                        #[cfg(target_os = "windows")]
                        accelerators.set(menu.menu.haccel() as isize);
                        installed = Some(menu);
                        tracing::info!("Application initialized.");
                    }
                    Err(e) => {
                        tracing::error!("Failed to install the application menu: {}", e);
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!("Close requested. Saving final window state...");
                    save_window_state(&window, &mut app_config);
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    app_config.window_size = (size.width.into(), size.height.into());
                }
                WindowEvent::Moved(position) => {
                    app_config.window_position = (position.x.into(), position.y.into());
                }
                _ => (),
            },
            Event::UserEvent(user_event) => {
                let Some(menu) = &installed else {
                    tracing::warn!("Dropping {:?}: no menu installed yet.", user_event);
                    return;
                };
                let ctx = EventContext {
                    commands: &menu.commands,
                    proxy: &proxy,
                    shell: &webview,
                    notifications: &notifications,
                    devtools_enabled: app_config.devtools_enabled,
                };
                match app::handle_user_event(user_event, &ctx) {
                    ShellRequest::Continue => (),
                    ShellRequest::CloseWindow | ShellRequest::Quit => {
                        tracing::info!("Exit requested from the menu. Saving final window state...");
                        save_window_state(&window, &mut app_config);
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            _ => (),
        }
    });
}

fn save_window_state(window: &Window, app_config: &mut AppConfig) {
    let size = window.inner_size();
    let position = window.outer_position().unwrap_or_default();
    app_config.window_size = (size.width.into(), size.height.into());
    app_config.window_position = (position.x.into(), position.y.into());

    if let Err(e) = config::settings::save_config(app_config, None) {
        tracing::error!("Failed to save config on exit: {}", e);
    }
}
