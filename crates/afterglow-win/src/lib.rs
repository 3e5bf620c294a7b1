//! Windows desktop host: the trail drawn on a click-through overlay that
//! spans every monitor.
#![cfg(windows)]

use afterglow_core::TrailConfig;
use afterglow_platform::{PlatformError, PointerKind, Result, TrailHost, TrailSession};
use tracing::{info, warn};

mod input;
mod overlay;
mod tray;

use crate::input::MouseHookInput;
use crate::overlay::{LayeredSurface, TimerScheduler};
use windows::Win32::Foundation::{HINSTANCE, HWND};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::*;

// Public app entry ----------------
/// Start the overlay trail and run the message loop until the tray's Exit item
/// is chosen.
pub fn run_app(config: TrailConfig) -> Result<()> {
    unsafe {
        if let Err(err) =
            SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2)
        {
            warn!("per-monitor DPI awareness unavailable: {err}");
        }
    }
    let hinstance = HINSTANCE(unsafe { GetModuleHandleW(None) }.map_err(os)?.0);
    let mut host = WinHost::new(hinstance);

    let Some(session) = TrailSession::start(&mut host, config.clone())? else {
        info!("no trail to show; exiting");
        return Ok(());
    };

    let (tray, exit_id) = match tray::create_tray_icon(&config) {
        Ok(tray) => tray,
        Err(err) => {
            if let Err(shutdown_err) = session.shutdown(&mut host) {
                warn!("cursor trail shutdown failed: {shutdown_err}");
            }
            overlay::clear_routes();
            return Err(err);
        }
    };
    tray::handle_exit(exit_id);
    info!("tray icon created; entering message loop");

    unsafe {
        let mut message = MSG::default();
        'main: loop {
            while PeekMessageW(&mut message, HWND(std::ptr::null_mut()), 0, 0, PM_REMOVE).into() {
                if message.message == WM_QUIT {
                    break 'main;
                }
                let _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
            // Frames arrive as WM_TIMER and pointer moves through the hook,
            // both while waiting here.
            let _ = WaitMessage();
        }
    }

    drop(tray);
    session.shutdown(&mut host)?;
    overlay::clear_routes();
    Ok(())
}

pub struct WinHost {
    hinstance_value: isize,
    input: MouseHookInput,
    scheduler: TimerScheduler,
}

impl WinHost {
    pub fn new(hinstance: HINSTANCE) -> Self {
        Self {
            hinstance_value: hinstance.0 as isize,
            input: MouseHookInput::new(hinstance),
            scheduler: TimerScheduler::default(),
        }
    }

    fn hinstance(&self) -> HINSTANCE {
        HINSTANCE(self.hinstance_value as *mut core::ffi::c_void)
    }
}

impl TrailHost for WinHost {
    type Surface = LayeredSurface;
    type Input = MouseHookInput;
    type Scheduler = TimerScheduler;

    fn pointer_kind(&self) -> PointerKind {
        let (mouse_present, touch_points) = unsafe {
            (
                GetSystemMetrics(SM_MOUSEPRESENT) != 0,
                GetSystemMetrics(SM_MAXIMUMTOUCHES),
            )
        };
        info!("pointer devices: mouse={mouse_present}, touch points={touch_points}");
        PointerKind::detect(false, !mouse_present && touch_points > 0)
    }

    fn seed(&self) -> u64 {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        nanos ^ u64::from(std::process::id()).rotate_left(32)
    }

    fn create_surface(&mut self) -> Result<LayeredSurface> {
        let surface = LayeredSurface::create(self.hinstance())?;
        self.scheduler.attach(surface.hwnd());
        Ok(surface)
    }

    fn input(&mut self) -> &mut MouseHookInput {
        &mut self.input
    }

    fn scheduler(&mut self) -> &mut TimerScheduler {
        &mut self.scheduler
    }
}

pub(crate) fn os(err: windows::core::Error) -> PlatformError {
    PlatformError::backend(err)
}
