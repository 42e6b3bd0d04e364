//! 界面提示文案

pub const LOGIN_MISSING_FIELDS: &str = "Completa correo y contraseña";
pub const LOGIN_REJECTED: &str = "Credenciales incorrectas";
pub const LOGIN_SUCCESS: &str = "Sesión iniciada correctamente";

pub const REGISTER_MISSING_FIELDS: &str = "Completa todos los campos";
pub const REGISTER_PASSWORD_TOO_SHORT: &str = "La contraseña debe tener mínimo 6 caracteres";
pub const REGISTER_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
pub const REGISTER_REJECTED: &str = "Error al registrar usuario";
pub const REGISTER_SUCCESS: &str = "Registro exitoso. Ahora inicia sesión.";

pub const CONNECTION_ERROR: &str = "Error de conexión con el servidor";

pub const LOGOUT_SUCCESS: &str = "Sesión cerrada";

pub const UPLOAD_MISSING_INPUT: &str = "Selecciona archivo y categoría";
pub const UPLOAD_REJECTED: &str = "Error al subir archivo";
pub const UPLOAD_CONNECTION_ERROR: &str = "Error de conexión al subir archivo";
pub const UPLOAD_SUCCESS: &str = "Archivo subido correctamente";

pub const CATEGORIES_LOAD_FAILED: &str = "No se pudieron cargar categorías";
pub const RESOURCES_LOAD_FAILED: &str = "No se pudieron cargar recursos";
