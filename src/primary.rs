//! The primary display as seen through `winuser.h` and `wingdi.h`.

#[cfg(windows)]
pub use self::windows::PrimaryDisplay;

#[cfg(not(windows))]
pub use self::unsupported::PrimaryDisplay;

#[cfg(windows)]
mod windows {
    use std::ffi::c_void;

    use log::debug;
    use winsafe::guard::ReleaseDCGuard;
    use winsafe::prelude::*;
    use winsafe::{co, HWND};

    use crate::{DisplayBackend, DisplayError, DisplayResult, GammaRamp, Resolution};

    // winsafe has no SetDeviceGammaRamp.
    #[link(name = "gdi32")]
    extern "system" {
        fn SetDeviceGammaRamp(hdc: *mut c_void, ramp: *const c_void) -> i32;
    }

    /// Provides a resolution-only `winsafe::DEVMODE`
    trait FromResolution {
        fn set_resolution(&mut self, resolution: Resolution);

        fn from_resolution(resolution: Resolution) -> winsafe::DEVMODE {
            let mut devmode = winsafe::DEVMODE::default();
            devmode.set_resolution(resolution);
            devmode
        }
    }

    impl FromResolution for winsafe::DEVMODE {
        fn set_resolution(&mut self, resolution: Resolution) {
            self.dmPelsWidth = resolution.width;
            self.dmPelsHeight = resolution.height;
            self.dmFields = co::DM::PELSWIDTH | co::DM::PELSHEIGHT;
        }
    }

    /// The primary display and the screen device context, released on drop
    pub struct PrimaryDisplay {
        hdc: ReleaseDCGuard<'static>,
    }

    impl PrimaryDisplay {
        /// Acquires the screen device context
        pub fn open() -> DisplayResult<Self> {
            // A null window stands for the whole screen.
            let screen: &'static HWND = &HWND::NULL;
            let hdc = screen.GetDC().map_err(|err| {
                debug!("GetDC failed: {}", err);
                DisplayError::NoDeviceContext
            })?;
            debug!("Acquired screen device context {:?}", hdc.ptr());
            Ok(Self { hdc })
        }
    }

    impl DisplayBackend for PrimaryDisplay {
        fn current_resolution(&self) -> Resolution {
            let width = winsafe::GetSystemMetrics(co::SM::CXSCREEN);
            let height = winsafe::GetSystemMetrics(co::SM::CYSCREEN);
            Resolution::new(width.max(0) as u32, height.max(0) as u32)
        }

        fn apply_resolution(&mut self, resolution: Resolution) -> DisplayResult {
            let mut devmode = winsafe::DEVMODE::from_resolution(resolution);
            let result = winsafe::ChangeDisplaySettingsEx(None, Some(&mut devmode), co::CDS::DYNAMICALLY);
            match result {
                Ok(_) => Ok(()),
                Err(err) => Err(DisplayError::ApplyFailed(err.to_string())),
            }
        }

        fn set_gamma_ramp(&mut self, ramp: &GammaRamp) -> DisplayResult {
            // SAFETY: `GammaRamp` is `repr(C)` with three 256-entry u16 arrays,
            // the layout SetDeviceGammaRamp reads.
            let accepted = unsafe { SetDeviceGammaRamp(self.hdc.ptr(), ramp as *const GammaRamp as *const c_void) };
            if accepted == 0 {
                return Err(DisplayError::GammaRejected);
            }
            Ok(())
        }
    }
}

#[cfg(not(windows))]
mod unsupported {
    use crate::{DisplayBackend, DisplayError, DisplayResult, GammaRamp, Resolution};

    /// Stand-in for platforms without display control
    pub enum PrimaryDisplay {}

    impl PrimaryDisplay {
        pub fn open() -> DisplayResult<Self> {
            Err(DisplayError::Unsupported)
        }
    }

    impl DisplayBackend for PrimaryDisplay {
        fn current_resolution(&self) -> Resolution {
            match *self {}
        }

        fn apply_resolution(&mut self, _resolution: Resolution) -> DisplayResult {
            match *self {}
        }

        fn set_gamma_ramp(&mut self, _ramp: &GammaRamp) -> DisplayResult {
            match *self {}
        }
    }
}
