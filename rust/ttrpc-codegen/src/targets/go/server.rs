//! Server side: service interface, server stream types, registration.

use std::fmt;

use super::{MethodPlan, ServicePlan, bool_literal};
use crate::code_writer::CodeWriter;
use crate::cw_writeln;
use crate::dispatch::{DispatchTable, StreamRoute};
use crate::go_file::Imports;
use crate::naming::{Side, StreamType, register_fn_name, service_interface_name, stream_type_name};
use crate::shape::MethodShape;

pub(crate) fn generate_server(plan: &ServicePlan<'_>, imports: &mut Imports) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let mut w = CodeWriter::with_tabs(&mut out);

    write_service_interface(&mut w, plan, imports)?;
    for method in plan.methods.iter().filter(|m| m.shape.is_streaming()) {
        write_server_stream(&mut w, plan, imports, method)?;
    }
    write_register_fn(&mut w, plan, imports)?;

    Ok(out)
}

/// The interface a server implements. Streaming methods take their
/// `<Service>_<Method>Server` handle in place of (or after) the request.
fn write_service_interface(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
) -> fmt::Result {
    let service = plan.service;
    let ctx = &plan.rt.context;

    w.block(
        &format!("type {} interface", service_interface_name(&service.go_name)),
        |w| {
            for m in &plan.methods {
                let name = &m.desc.go_name;
                let stream = || {
                    stream_type_name(&service.go_name, name, Side::Server, StreamType::Interface)
                };
                match m.shape {
                    MethodShape::Unary => {
                        let input = m.input(imports);
                        let output = m.output(imports);
                        cw_writeln!(w, "{name}({ctx}, *{input}) (*{output}, error)")?
                    }
                    MethodShape::ClientStream => {
                        let output = m.output(imports);
                        cw_writeln!(w, "{name}({ctx}, {}) (*{output}, error)", stream())?
                    }
                    MethodShape::ServerStream => {
                        let input = m.input(imports);
                        cw_writeln!(w, "{name}({ctx}, *{input}, {}) error", stream())?
                    }
                    MethodShape::BidiStream => cw_writeln!(w, "{name}({ctx}, {}) error", stream())?,
                }
            }
            Ok(())
        },
    )?;
    w.blank_line()
}

/// `<Service>_<Method>Server` and the unexported wrapper implementing it
/// over `ttrpc.StreamServer`.
fn write_server_stream(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
    m: &MethodPlan<'_>,
) -> fmt::Result {
    let Some(caps) = m.shape.server_capabilities() else {
        return Ok(());
    };
    let service = &plan.service.go_name;
    let method = &m.desc.go_name;
    let interface = stream_type_name(service, method, Side::Server, StreamType::Interface);
    let wrapper = stream_type_name(service, method, Side::Server, StreamType::Wrapper);
    let base = &plan.rt.stream_server;

    w.block(&format!("type {interface} interface"), |w| {
        if caps.send {
            cw_writeln!(w, "Send(*{}) error", m.output(imports))?;
        }
        if caps.recv {
            cw_writeln!(w, "Recv() (*{}, error)", m.input(imports))?;
        }
        w.writeln(base)
    })?;
    w.blank_line()?;

    w.block(&format!("type {wrapper} struct"), |w| w.writeln(base))?;
    w.blank_line()?;

    if caps.send {
        let output = m.output(imports);
        w.block(&format!("func (x *{wrapper}) Send(m *{output}) error"), |w| {
            w.writeln("return x.StreamServer.SendMsg(m)")
        })?;
        w.blank_line()?;
    }

    if caps.recv {
        let input = m.input(imports);
        w.block(&format!("func (x *{wrapper}) Recv() (*{input}, error)"), |w| {
            cw_writeln!(w, "m := new({input})")?;
            w.block("if err := x.StreamServer.RecvMsg(m); err != nil", |w| {
                w.writeln("return nil, err")
            })?;
            w.writeln("return m, nil")
        })?;
        w.blank_line()?;
    }

    Ok(())
}

/// `Register<Service>Service`, which hands ttrpc the dispatch table.
fn write_register_fn(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
) -> fmt::Result {
    let service = plan.service;
    let rt = &plan.rt;
    let table = DispatchTable::build(
        &service.full_name,
        plan.methods
            .iter()
            .map(|m| (m.desc.go_name.as_str(), m.shape, m)),
    );
    let interface = service_interface_name(&service.go_name);

    w.block(
        &format!(
            "func {}(srv *{}, svc {interface})",
            register_fn_name(&service.go_name),
            rt.server
        ),
        |w| {
            w.block_with(
                &format!(
                    "srv.RegisterService(\"{}\", &{}{{",
                    table.service_key, rt.service_desc
                ),
                "})",
                |w| {
                    write_methods_map(w, plan, imports, &table)?;
                    write_streams_map(w, plan, imports, &table)
                },
            )
        },
    )?;
    w.blank_line()
}

fn write_methods_map(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
    table: &DispatchTable<'_, &MethodPlan<'_>>,
) -> fmt::Result {
    let rt = &plan.rt;
    let mut unary = table.unary().peekable();
    if unary.peek().is_none() {
        return Ok(());
    }

    w.block_with(&format!("Methods: map[string]{}{{", rt.method), "},", |w| {
        for (key, m) in unary {
            w.block_with(
                &format!(
                    "\"{key}\": func(ctx {}, unmarshal func(interface{{}}) error) (interface{{}}, error) {{",
                    rt.context
                ),
                "},",
                |w| {
                    cw_writeln!(w, "var req {}", m.input(imports))?;
                    w.block("if err := unmarshal(&req); err != nil", |w| {
                        w.writeln("return nil, err")
                    })?;
                    cw_writeln!(w, "return svc.{}(ctx, &req)", m.desc.go_name)
                },
            )?;
        }
        Ok(())
    })
}

fn write_streams_map(
    w: &mut CodeWriter<&mut String>,
    plan: &ServicePlan<'_>,
    imports: &mut Imports,
    table: &DispatchTable<'_, &MethodPlan<'_>>,
) -> fmt::Result {
    let rt = &plan.rt;
    let mut streams = table.streams().peekable();
    if streams.peek().is_none() {
        return Ok(());
    }

    w.block_with(&format!("Streams: map[string]{}{{", rt.stream), "},", |w| {
        for route in streams {
            let StreamRoute {
                key,
                method: m,
                client_streaming,
                server_streaming,
            } = route;
            let wrapper = stream_type_name(
                &plan.service.go_name,
                &m.desc.go_name,
                Side::Server,
                StreamType::Wrapper,
            );

            w.block_with(&format!("\"{key}\": {{"), "},", |w| {
                w.block_with(
                    &format!(
                        "Handler: func(ctx {}, stream {}) (interface{{}}, error) {{",
                        rt.context, rt.stream_server
                    ),
                    "},",
                    |w| {
                        let request_arg = if client_streaming {
                            ""
                        } else {
                            cw_writeln!(w, "m := new({})", m.input(imports))?;
                            w.block("if err := stream.RecvMsg(m); err != nil", |w| {
                                w.writeln("return nil, err")
                            })?;
                            "m, "
                        };
                        let call = format!(
                            "svc.{}(ctx, {request_arg}&{wrapper}{{stream}})",
                            m.desc.go_name
                        );
                        if server_streaming {
                            cw_writeln!(w, "return nil, {call}")
                        } else {
                            cw_writeln!(w, "return {call}")
                        }
                    },
                )?;
                cw_writeln!(w, "StreamingClient: {},", bool_literal(client_streaming))?;
                cw_writeln!(w, "StreamingServer: {},", bool_literal(server_streaming))
            })?;
        }
        Ok(())
    })
}
