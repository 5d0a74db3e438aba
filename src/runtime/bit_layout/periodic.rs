//! Sine and cosine of `pi x` and of `x` degrees.

use super::super::dispatch;
use super::{argument, settle};
use crate::dtype::{Float, FloatLayout};

pub(crate) fn sinpi<T: Float>(x: T) -> T {
    settle(x, dispatch::sinpi(argument(x), T::Layout::PRECISION))
}

pub(crate) fn cospi<T: Float>(x: T) -> T {
    settle(x, dispatch::cospi(argument(x)))
}

pub(crate) fn sind<T: Float>(x: T) -> T {
    settle(x, dispatch::sind(argument(x), T::Layout::PRECISION))
}

pub(crate) fn cosd<T: Float>(x: T) -> T {
    settle(x, dispatch::cosd(argument(x)))
}
