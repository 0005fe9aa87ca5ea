pub mod order;
pub mod receipt;

pub use order::{
    OrderKind, OrderRequest, OrderSide, OrderType, RawValue, TimeInForce, ValidatedOrder,
};
pub use receipt::{AccountInfo, AssetBalance, OrderReceipt};
