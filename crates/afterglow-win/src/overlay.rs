use afterglow_core::{Canvas, Viewport};
use afterglow_platform::{
    EventSink, FrameHandle, FrameScheduler, FrameStep, InputEvent, OverlaySurface, PixelCanvas,
    PlatformError, Result,
};
use tracing::{debug, info, warn};

use std::cell::RefCell;
use std::ffi::c_void;
use std::mem::size_of;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, SelectObject, AC_SRC_ALPHA,
    AC_SRC_OVER, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION, DIB_RGB_COLORS, HBITMAP, HBRUSH, HDC,
    HGDIOBJ,
};
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::os;

pub const OVERLAY_WINDOW_CLASS_NAME: PCWSTR = windows::core::w!("AfterglowOverlayClass");
const FRAME_TIMER_ID: usize = 1;
const FRAME_INTERVAL_MS: u32 = 16;

/// Callbacks the overlay window procedure dispatches to.
#[derive(Default)]
struct WindowRoutes {
    frame: Option<(FrameStep, FrameHandle)>,
    events: Option<EventSink>,
}

thread_local! {
    static ROUTES: RefCell<WindowRoutes> = RefCell::new(WindowRoutes::default());
}

pub(crate) fn route_events(sink: Option<EventSink>) {
    ROUTES.with(|routes| routes.borrow_mut().events = sink);
}

/// Drops every routed callback, and with them the surface they keep alive.
pub(crate) fn clear_routes() {
    let routes = ROUTES.with(|routes| std::mem::take(&mut *routes.borrow_mut()));
    drop(routes);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width.max(0) as u32, self.height.max(0) as u32)
    }
}

/// Bounding box of all monitors, in physical pixels.
pub fn virtual_screen() -> ScreenRect {
    unsafe {
        ScreenRect {
            x: GetSystemMetrics(SM_XVIRTUALSCREEN),
            y: GetSystemMetrics(SM_YVIRTUALSCREEN),
            width: GetSystemMetrics(SM_CXVIRTUALSCREEN),
            height: GetSystemMetrics(SM_CYVIRTUALSCREEN),
        }
    }
}

unsafe fn register_overlay_window_class(hinstance: HINSTANCE) -> PCWSTR {
    let window_class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(handle_overlay_window_message),
        hInstance: hinstance,
        hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
        hbrBackground: HBRUSH(std::ptr::null_mut()),
        lpszClassName: OVERLAY_WINDOW_CLASS_NAME,
        ..Default::default()
    };
    let _atom = RegisterClassW(&window_class);
    OVERLAY_WINDOW_CLASS_NAME
}

struct OverlayWindow {
    hwnd_value: isize,
    rect: ScreenRect,
}

impl OverlayWindow {
    fn create(hinstance: HINSTANCE) -> Result<Self> {
        let rect = virtual_screen();
        let hwnd = unsafe {
            let class_name = register_overlay_window_class(hinstance);
            create_overlay_hwnd(hinstance, class_name, &rect)?
        };
        info!(
            "overlay created: {}x{} @ ({}, {})",
            rect.width, rect.height, rect.x, rect.y
        );
        Ok(Self {
            hwnd_value: hwnd.0 as isize,
            rect,
        })
    }

    fn hwnd(&self) -> HWND {
        HWND(self.hwnd_value as *mut c_void)
    }

    fn reposition(&mut self, rect: ScreenRect) -> Result<()> {
        unsafe { update_overlay_window(self.hwnd(), &rect)? };
        self.rect = rect;
        Ok(())
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = KillTimer(self.hwnd(), FRAME_TIMER_ID);
            if let Err(err) = DestroyWindow(self.hwnd()) {
                warn!("DestroyWindow failed for overlay: {err}");
            }
        }
    }
}

/// 32-bit top-down DIB selected into a memory DC, used as the
/// `UpdateLayeredWindow` source.
struct DibSection {
    dc: HDC,
    bitmap: HBITMAP,
    previous: HGDIOBJ,
    bits: *mut c_void,
    viewport: Viewport,
}

impl DibSection {
    unsafe fn new(viewport: Viewport) -> Result<Self> {
        let dc = CreateCompatibleDC(None);
        if dc.is_invalid() {
            return Err(PlatformError::Surface("CreateCompatibleDC failed".into()));
        }
        let info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: viewport.width as i32,
                // Negative height: rows run top to bottom like PixelCanvas.
                biHeight: -(viewport.height as i32),
                biPlanes: 1,
                biBitCount: 32,
                biCompression: 0, // BI_RGB
                ..Default::default()
            },
            ..Default::default()
        };
        let mut bits: *mut c_void = std::ptr::null_mut();
        let bitmap = match CreateDIBSection(dc, &info, DIB_RGB_COLORS, &mut bits, None, 0) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                let _ = DeleteDC(dc);
                return Err(os(err));
            }
        };
        let previous = SelectObject(dc, HGDIOBJ(bitmap.0));
        debug!("allocated {}x{} overlay DIB", viewport.width, viewport.height);
        Ok(Self {
            dc,
            bitmap,
            previous,
            bits,
            viewport,
        })
    }
}

impl Drop for DibSection {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc, self.previous);
            let _ = DeleteObject(HGDIOBJ(self.bitmap.0));
            let _ = DeleteDC(self.dc);
        }
    }
}

/// Click-through layered window spanning the virtual screen. Frames are
/// rasterized in software and pushed with per-pixel alpha.
pub struct LayeredSurface {
    window: OverlayWindow,
    canvas: PixelCanvas,
    dib: Option<DibSection>,
}

impl LayeredSurface {
    pub fn create(hinstance: HINSTANCE) -> Result<Self> {
        let window = OverlayWindow::create(hinstance)?;
        let canvas = PixelCanvas::new(window.rect.viewport());
        Ok(Self {
            window,
            canvas,
            dib: None,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.window.hwnd()
    }
}

impl OverlaySurface for LayeredSurface {
    fn viewport(&self) -> Viewport {
        self.canvas.viewport()
    }

    fn resize(&mut self, viewport: Viewport) -> Result<()> {
        let screen = virtual_screen();
        let rect = ScreenRect {
            width: viewport.width as i32,
            height: viewport.height as i32,
            ..screen
        };
        self.window.reposition(rect)?;
        self.canvas.resize(viewport);
        Ok(())
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<()> {
        let viewport = self.canvas.viewport();
        if viewport.area() == 0 {
            return Ok(());
        }
        if self.dib.as_ref().map(|dib| dib.viewport) != Some(viewport) {
            self.dib = None;
            self.dib = Some(unsafe { DibSection::new(viewport)? });
        }
        let Some(dib) = self.dib.as_ref() else {
            return Ok(());
        };

        let bytes = self.canvas.as_bytes();
        let rect = self.window.rect;
        let destination = POINT {
            x: rect.x,
            y: rect.y,
        };
        let size = SIZE {
            cx: viewport.width as i32,
            cy: viewport.height as i32,
        };
        let source = POINT { x: 0, y: 0 };
        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: AC_SRC_ALPHA as u8,
        };
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), dib.bits as *mut u8, bytes.len());
            UpdateLayeredWindow(
                self.window.hwnd(),
                None,
                Some(&destination as *const POINT),
                Some(&size as *const SIZE),
                dib.dc,
                Some(&source as *const POINT),
                COLORREF(0),
                Some(&blend as *const BLENDFUNCTION),
                ULW_ALPHA,
            )
            .map_err(os)
        }
    }

    fn detach(&mut self) -> Result<()> {
        unsafe {
            let _ = ShowWindow(self.window.hwnd(), SW_HIDE);
        }
        self.dib = None;
        debug!("overlay hidden");
        Ok(())
    }
}

/// Drives frames from a `WM_TIMER` on the overlay window.
#[derive(Default)]
pub struct TimerScheduler {
    hwnd_value: Option<isize>,
}

impl TimerScheduler {
    pub fn attach(&mut self, hwnd: HWND) {
        self.hwnd_value = Some(hwnd.0 as isize);
    }
}

impl FrameScheduler for TimerScheduler {
    fn schedule(&mut self, step: FrameStep) -> Result<FrameHandle> {
        let Some(hwnd_value) = self.hwnd_value else {
            return Err(PlatformError::Scheduler("no overlay window to time frames on".into()));
        };
        let handle = FrameHandle::new();
        ROUTES.with(|routes| routes.borrow_mut().frame = Some((step, handle.clone())));
        let hwnd = HWND(hwnd_value as *mut c_void);
        let timer = unsafe { SetTimer(hwnd, FRAME_TIMER_ID, FRAME_INTERVAL_MS, None) };
        if timer == 0 {
            ROUTES.with(|routes| routes.borrow_mut().frame = None);
            return Err(PlatformError::Scheduler("SetTimer failed".into()));
        }
        Ok(handle)
    }
}

unsafe fn run_frame(hwnd: HWND) {
    ROUTES.with(|routes| {
        let Ok(mut routes) = routes.try_borrow_mut() else {
            return;
        };
        let routes = &mut *routes;
        match routes.frame.as_mut() {
            Some((_, handle)) if handle.is_stopped() => {
                let _ = KillTimer(hwnd, FRAME_TIMER_ID);
                routes.frame = None;
                debug!("frame timer stopped");
            }
            Some((step, _)) => step(),
            None => {}
        }
    });
}

fn notify_environment_change(reason: &str) {
    let rect = virtual_screen();
    info!(
        "overlay environment change ({reason}) -> {}x{} @ ({}, {})",
        rect.width, rect.height, rect.x, rect.y
    );
    let sink = ROUTES.with(|routes| routes.try_borrow().ok().and_then(|r| r.events.clone()));
    if let Some(sink) = sink {
        sink(InputEvent::Resized(rect.viewport()));
    }
}

pub unsafe extern "system" fn handle_overlay_window_message(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_NCHITTEST => LRESULT(HTTRANSPARENT as isize),
        WM_TIMER if wparam.0 == FRAME_TIMER_ID => {
            run_frame(hwnd);
            LRESULT(0)
        }
        WM_DEVICECHANGE | WM_DISPLAYCHANGE | WM_DPICHANGED | WM_SETTINGCHANGE => {
            let reason = match msg {
                WM_DEVICECHANGE => "device change",
                WM_DISPLAYCHANGE => "display change",
                WM_DPICHANGED => "dpi change",
                _ => "setting change",
            };
            notify_environment_change(reason);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

unsafe fn create_overlay_hwnd(
    hinstance: HINSTANCE,
    class_name: PCWSTR,
    rect: &ScreenRect,
) -> Result<HWND> {
    let hwnd = CreateWindowExW(
        WINDOW_EX_STYLE(
            WS_EX_LAYERED.0
                | WS_EX_TRANSPARENT.0
                | WS_EX_TOPMOST.0
                | WS_EX_TOOLWINDOW.0
                | WS_EX_NOACTIVATE.0,
        ),
        class_name,
        windows::core::w!("Afterglow Overlay"),
        WS_POPUP,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        None,
        None,
        hinstance,
        None,
    )
    .map_err(os)?;
    update_overlay_window(hwnd, rect)?;
    Ok(hwnd)
}

unsafe fn update_overlay_window(hwnd: HWND, rect: &ScreenRect) -> Result<()> {
    let flags = SWP_NOACTIVATE | SWP_SHOWWINDOW;
    SetWindowPos(
        hwnd,
        HWND_TOPMOST,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        flags,
    )
    .map_err(os)?;
    Ok(())
}
