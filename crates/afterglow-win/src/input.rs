use afterglow_core::Vec2;
use afterglow_platform::{EventSink, InputEvent, InputSource, Result};
use tracing::info;

use std::cell::RefCell;

use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, HHOOK, MSLLHOOKSTRUCT,
    WH_MOUSE_LL, WM_MOUSEMOVE,
};

use crate::os;
use crate::overlay::{route_events, virtual_screen};

thread_local! {
    static POINTER_SINK: RefCell<Option<EventSink>> = const { RefCell::new(None) };
}

/// Global pointer moves via a low-level mouse hook. Needs a message loop on
/// the installing thread.
pub struct MouseHookInput {
    hinstance_value: isize,
    hook: Option<HHOOK>,
}

impl MouseHookInput {
    pub fn new(hinstance: HINSTANCE) -> Self {
        Self {
            hinstance_value: hinstance.0 as isize,
            hook: None,
        }
    }
}

impl InputSource for MouseHookInput {
    fn start(&mut self, sink: EventSink) -> Result<()> {
        if self.hook.is_some() {
            return Ok(());
        }
        POINTER_SINK.with(|slot| *slot.borrow_mut() = Some(sink.clone()));
        route_events(Some(sink));

        let hinstance = HINSTANCE(self.hinstance_value as *mut core::ffi::c_void);
        let installed =
            unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(handle_mouse_hook), hinstance, 0) };
        let hook = match installed {
            Ok(hook) => hook,
            Err(err) => {
                POINTER_SINK.with(|slot| slot.borrow_mut().take());
                route_events(None);
                return Err(os(err));
            }
        };
        self.hook = Some(hook);
        info!("low-level mouse hook installed");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        POINTER_SINK.with(|slot| slot.borrow_mut().take());
        route_events(None);
        if let Some(hook) = self.hook.take() {
            unsafe { UnhookWindowsHookEx(hook) }.map_err(os)?;
            info!("low-level mouse hook removed");
        }
        Ok(())
    }
}

unsafe extern "system" fn handle_mouse_hook(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 && wparam.0 as u32 == WM_MOUSEMOVE {
        let info = &*(lparam.0 as *const MSLLHOOKSTRUCT);
        let origin = virtual_screen();
        let at = Vec2::new((info.pt.x - origin.x) as f32, (info.pt.y - origin.y) as f32);
        let sink = POINTER_SINK.with(|slot| slot.try_borrow().ok().and_then(|s| s.clone()));
        if let Some(sink) = sink {
            sink(InputEvent::PointerMoved(at));
        }
    }
    CallNextHookEx(None, code, wparam, lparam)
}
