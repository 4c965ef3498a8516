//! Pushing fixed-function state descriptions to the native context.
//!
//! Every state is applied against the snapshot that was pushed before it. With
//! no snapshot all of its calls are issued, otherwise only the calls whose
//! values changed.

use super::assets::prelude::*;
use super::backends::Visitor;

impl DepthStencilStateInfo {
    pub(crate) unsafe fn apply(
        &self,
        reference: i32,
        previous: Option<(&DepthStencilStateInfo, i32)>,
        visitor: &mut dyn Visitor,
    ) {
        let (prev, prev_reference) = match previous {
            Some(v) => v,
            None => {
                visitor.set_depth_test(self.depth_enabled);
                visitor.set_depth_write(self.depth_write);
                visitor.set_depth_func(self.depth_comparison);
                visitor.set_stencil_test(self.stencil_enabled);
                visitor.set_stencil_write_mask(self.stencil_write_mask);

                for &face in &[StencilFace::Front, StencilFace::Back] {
                    let v = self.face(face);
                    visitor.set_stencil_func(face, v.comparison, reference, self.stencil_read_mask);
                    visitor.set_stencil_op(face, v.fail, v.depth_fail, v.pass);
                }

                return;
            }
        };

        if prev.depth_enabled != self.depth_enabled {
            visitor.set_depth_test(self.depth_enabled);
        }

        if prev.depth_write != self.depth_write {
            visitor.set_depth_write(self.depth_write);
        }

        if prev.depth_comparison != self.depth_comparison {
            visitor.set_depth_func(self.depth_comparison);
        }

        if prev.stencil_enabled != self.stencil_enabled {
            visitor.set_stencil_test(self.stencil_enabled);
        }

        if prev.stencil_write_mask != self.stencil_write_mask {
            visitor.set_stencil_write_mask(self.stencil_write_mask);
        }

        let func_shared = prev.stencil_read_mask == self.stencil_read_mask && prev_reference == reference;
        for &face in &[StencilFace::Front, StencilFace::Back] {
            let (p, v) = (prev.face(face), self.face(face));

            if !func_shared || p.comparison != v.comparison {
                visitor.set_stencil_func(face, v.comparison, reference, self.stencil_read_mask);
            }

            if p.fail != v.fail || p.depth_fail != v.depth_fail || p.pass != v.pass {
                visitor.set_stencil_op(face, v.fail, v.depth_fail, v.pass);
            }
        }
    }
}

impl RasterizerStateInfo {
    pub(crate) unsafe fn apply(
        &self,
        previous: Option<&RasterizerStateInfo>,
        visitor: &mut dyn Visitor,
    ) {
        if previous.map(|v| v.cull_mode) != Some(self.cull_mode) {
            visitor.set_cull_mode(self.cull_mode);
        }

        if previous.map(|v| v.front_face) != Some(self.front_face) {
            visitor.set_front_face(self.front_face);
        }

        if previous.map(|v| v.fill_mode) != Some(self.fill_mode) {
            visitor.set_fill_mode(self.fill_mode);
        }
    }
}

impl BlendStateInfo {
    pub(crate) unsafe fn apply(&self, previous: Option<&BlendStateInfo>, visitor: &mut dyn Visitor) {
        if previous.map(|v| v.enabled) != Some(self.enabled) {
            visitor.set_blend(self.enabled);
        }

        let factors = |v: &BlendStateInfo| {
            (
                v.color_source,
                v.color_destination,
                v.alpha_source,
                v.alpha_destination,
            )
        };

        if previous.map(factors) != Some(factors(self)) {
            visitor.set_blend_func(
                self.color_source,
                self.color_destination,
                self.alpha_source,
                self.alpha_destination,
            );
        }

        let equations = |v: &BlendStateInfo| (v.color_operation, v.alpha_operation);
        if previous.map(equations) != Some(equations(self)) {
            visitor.set_blend_equation(self.color_operation, self.alpha_operation);
        }

        if previous.map(|v| v.write_mask) != Some(self.write_mask) {
            visitor.set_color_write(self.write_mask);
        }
    }
}
