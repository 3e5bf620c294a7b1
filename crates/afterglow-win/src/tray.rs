use afterglow_core::TrailConfig;
use afterglow_platform::{PlatformError, Result};
use tracing::info;

use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;

const ICON_SIZE: u32 = 16;

/// Tray icon whose only menu item ends the message loop.
pub fn create_tray_icon(config: &TrailConfig) -> Result<(TrayIcon, MenuId)> {
    let icon = Icon::from_rgba(palette_icon(config), ICON_SIZE, ICON_SIZE)
        .map_err(PlatformError::backend)?;

    let menu = Menu::new();
    let exit_item = MenuItem::new("Exit", true, None);
    let exit_id = exit_item.id().clone();
    menu.append(&exit_item).map_err(PlatformError::backend)?;

    let tray = TrayIconBuilder::new()
        .with_icon(icon)
        .with_tooltip("Afterglow")
        .with_menu(Box::new(menu))
        .build()
        .map_err(PlatformError::backend)?;

    Ok((tray, exit_id))
}

pub fn handle_exit(exit_id: MenuId) {
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        if event.id() == &exit_id {
            info!("tray: exit requested");
            unsafe { PostQuitMessage(0) };
        }
    }));
}

/// Round dot split into vertical bands of the trail palette.
fn palette_icon(config: &TrailConfig) -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let mut rgba = vec![0u8; size * size * 4];
    for (index, px) in rgba.chunks_exact_mut(4).enumerate() {
        let (x, y) = ((index % size) as f32, (index / size) as f32);
        let distance = ((x - center).powi(2) + (y - center).powi(2)).sqrt();
        if distance > center + 0.5 {
            continue;
        }
        let band = (index % size) * config.palette.len() / size;
        let color = config.palette[band];
        px.copy_from_slice(&[color.r(), color.g(), color.b(), 255]);
    }
    rgba
}
