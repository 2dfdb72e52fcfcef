use super::__gl_imports::raw;

pub type GLsync = *const raw::c_void;
pub type GLeglImageOES = *const raw::c_void;
pub type GLeglClientBufferEXT = *const raw::c_void;

pub type GLDEBUGPROC = Option<
    extern "system" fn(
        source: u32,
        gltype: u32,
        id: u32,
        severity: u32,
        length: i32,
        message: *const raw::c_char,
        userParam: *mut raw::c_void,
    ),
>;
pub type GLDEBUGPROCAMD = Option<
    extern "system" fn(
        id: u32,
        category: u32,
        severity: u32,
        length: i32,
        message: *const raw::c_char,
        userParam: *mut raw::c_void,
    ),
>;
pub type GLVULKANPROCNV = Option<extern "system" fn()>;
