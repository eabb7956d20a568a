pub(crate) mod toasts;
