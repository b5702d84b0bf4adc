pub mod adapter;
pub mod factory;
pub mod presenter;

pub use factory::PixelsPresenterFactory;
pub use presenter::PixelsPresenter;
