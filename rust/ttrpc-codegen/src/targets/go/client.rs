//! Client side: client interface, client struct, call bodies and client
//! stream types.

use std::fmt;

use super::{MethodPlan, ServicePlan, bool_literal};
use crate::code_writer::CodeWriter;
use crate::cw_writeln;
use crate::go_file::Imports;
use crate::naming::{
    Side, StreamType, client_constructor_name, client_interface_name, client_struct_name,
    service_interface_name, stream_type_name,
};
use crate::shape::MethodShape;

pub(crate) fn generate_client(plan: &ServicePlan<'_>, imports: &mut Imports) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let mut w = CodeWriter::with_tabs(&mut out);

    // Without streams the client satisfies the service interface itself, the
    // binding shape ttrpc had before streaming existed.
    let interface = if plan.has_streams() {
        write_client_interface(&mut w, plan, imports)?;
        client_interface_name(&plan.service.go_name)
    } else {
        service_interface_name(&plan.service.go_name)
    };

    write_client_struct(&mut w, plan, &interface)?;
    for method in &plan.methods {
        write_client_method(&mut w, plan, imports, method)?;
    }

    Ok(out)
}

fn write_client_interface(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
) -> fmt::Result {
    let service = &plan.service.go_name;
    let ctx = &plan.rt.context;

    w.block(&format!("type {} interface", client_interface_name(service)), |w| {
        for m in &plan.methods {
            let name = &m.desc.go_name;
            let stream = || stream_type_name(service, name, Side::Client, StreamType::Interface);
            match m.shape {
                MethodShape::Unary => {
                    let input = m.input(imports);
                    let output = m.output(imports);
                    cw_writeln!(w, "{name}({ctx}, *{input}) (*{output}, error)")?
                }
                MethodShape::ServerStream => {
                    cw_writeln!(w, "{name}({ctx}, *{}) ({}, error)", m.input(imports), stream())?
                }
                MethodShape::ClientStream | MethodShape::BidiStream => {
                    cw_writeln!(w, "{name}({ctx}) ({}, error)", stream())?
                }
            }
        }
        Ok(())
    })?;
    w.blank_line()
}

fn write_client_struct(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    interface: &str,
) -> fmt::Result {
    let service = &plan.service.go_name;
    let client = &plan.rt.client;
    let strukt = client_struct_name(service);

    w.block(&format!("type {strukt} struct"), |w| {
        cw_writeln!(w, "client *{client}")
    })?;
    w.block(
        &format!(
            "func {}(client *{client}) {interface}",
            client_constructor_name(service)
        ),
        |w| {
            w.block_with(&format!("return &{strukt}{{"), "}", |w| {
                w.writeln("client: client,")
            })
        },
    )?;
    w.blank_line()
}

fn write_client_method(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
    m: &MethodPlan<'_>,
) -> fmt::Result {
    let service = &plan.service.go_name;
    let name = &m.desc.go_name;
    let strukt = client_struct_name(service);
    let ctx = &plan.rt.context;

    let request_param = if m.shape.client_streaming() {
        String::new()
    } else {
        format!(", req *{}", m.input(imports))
    };
    let returns = if m.shape.is_streaming() {
        stream_type_name(service, name, Side::Client, StreamType::Interface)
    } else {
        format!("*{}", m.output(imports))
    };

    w.block(
        &format!("func (c *{strukt}) {name}(ctx {ctx}{request_param}) ({returns}, error)"),
        |w| match m.shape {
            MethodShape::Unary => write_unary_call(w, plan, imports, m),
            MethodShape::ClientStream | MethodShape::ServerStream | MethodShape::BidiStream => {
                write_stream_call(w, plan, m)
            }
        },
    )?;
    w.blank_line()?;

    write_client_stream(w, plan, imports, m)
}

fn write_unary_call(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
    m: &MethodPlan<'_>,
) -> fmt::Result {
    cw_writeln!(w, "var resp {}", m.output(imports))?;
    w.block(
        &format!(
            "if err := c.client.Call(ctx, \"{}\", \"{}\", req, &resp); err != nil",
            plan.service.full_name, m.desc.name
        ),
        |w| w.writeln("return nil, err"),
    )?;
    w.writeln("return &resp, nil")
}

fn write_stream_call(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    m: &MethodPlan<'_>,
) -> fmt::Result {
    let request = if m.shape.client_streaming() { "nil" } else { "req" };
    let wrapper = stream_type_name(
        &plan.service.go_name,
        &m.desc.go_name,
        Side::Client,
        StreamType::Wrapper,
    );

    w.block_with(
        &format!("stream, err := c.client.NewStream(ctx, &{}{{", plan.rt.stream_desc),
        &format!(
            "}}, \"{}\", \"{}\", {request})",
            plan.service.full_name, m.desc.go_name
        ),
        |w| {
            cw_writeln!(w, "StreamingClient: {},", bool_literal(m.shape.client_streaming()))?;
            cw_writeln!(w, "StreamingServer: {},", bool_literal(m.shape.server_streaming()))
        },
    )?;
    w.block("if err != nil", |w| w.writeln("return nil, err"))?;
    cw_writeln!(w, "x := &{wrapper}{{stream}}")?;
    w.writeln("return x, nil")
}

/// `<Service>_<Method>Client` and its wrapper over `ttrpc.ClientStream`.
fn write_client_stream(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
    m: &MethodPlan<'_>,
) -> fmt::Result {
    let Some(caps) = m.shape.client_capabilities() else {
        return Ok(());
    };
    let service = &plan.service.go_name;
    let method = &m.desc.go_name;
    let interface = stream_type_name(service, method, Side::Client, StreamType::Interface);
    let wrapper = stream_type_name(service, method, Side::Client, StreamType::Wrapper);
    let base = &plan.rt.client_stream;

    w.block(&format!("type {interface} interface"), |w| {
        if caps.send {
            cw_writeln!(w, "Send(*{}) error", m.input(imports))?;
        }
        if caps.recv {
            cw_writeln!(w, "Recv() (*{}, error)", m.output(imports))?;
        }
        if caps.close_and_recv {
            cw_writeln!(w, "CloseAndRecv() (*{}, error)", m.output(imports))?;
        }
        w.writeln(base)
    })?;
    w.blank_line()?;

    w.block(&format!("type {wrapper} struct"), |w| w.writeln(base))?;
    w.blank_line()?;

    if caps.send {
        let input = m.input(imports);
        w.block(&format!("func (x *{wrapper}) Send(m *{input}) error"), |w| {
            w.writeln("return x.ClientStream.SendMsg(m)")
        })?;
        w.blank_line()?;
    }

    let output = m.output(imports);
    if caps.recv {
        w.block(&format!("func (x *{wrapper}) Recv() (*{output}, error)"), |w| {
            write_recv_one(w, &output)
        })?;
        w.blank_line()?;
    }

    if caps.close_and_recv {
        w.block(
            &format!("func (x *{wrapper}) CloseAndRecv() (*{output}, error)"),
            |w| {
                w.block("if err := x.ClientStream.CloseSend(); err != nil", |w| {
                    w.writeln("return nil, err")
                })?;
                write_recv_one(w, &output)
            },
        )?;
        w.blank_line()?;
    }

    Ok(())
}

fn write_recv_one(w: &mut CodeWriter<&mut String>, output: &str) -> fmt::Result {
    cw_writeln!(w, "m := new({output})")?;
    w.block("if err := x.ClientStream.RecvMsg(m); err != nil", |w| {
        w.writeln("return nil, err")
    })?;
    w.writeln("return m, nil")
}
